/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::fs::File;
use std::io::{self,BufRead,BufReader,Lines,Read,Write};
use std::path::Path;
use flate2::read::GzDecoder;

type Result<T> = std::result::Result<T,std::io::Error>;

pub fn extension<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().extension().and_then(|ostr| ostr.to_str())
}

/// case insensitive extension check
pub fn has_extension<T: AsRef<Path>> (path: &T, ext: &str)->bool {
    extension(path).map( |e| e.eq_ignore_ascii_case(ext)).unwrap_or(false)
}

pub fn ensure_dir (path: impl AsRef<Path>)->io::Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// open a (possibly gzip compressed) text file for buffered reading. Compression is detected
/// by a ".gz" extension. Log files can get large, this never reads the whole file into memory
pub fn open_buffered (path: impl AsRef<Path>)->Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    if has_extension( &path, "gz") {
        Ok( Box::new( BufReader::with_capacity( 8192, GzDecoder::new(file))) )
    } else {
        Ok( Box::new( BufReader::with_capacity( 8192, file)) )
    }
}

/// line iterator over a (possibly compressed) text file
pub fn read_lines (path: impl AsRef<Path>)->Result<Lines<Box<dyn BufRead>>> {
    Ok( open_buffered(path)?.lines() )
}

pub fn filepath_contents <P: AsRef<Path>> (path: &P) -> Result<Vec<u8>> {
    let mut reader = open_buffered( path)?;
    let mut contents = Vec::new();
    reader.read_to_end(&mut contents)?;
    Ok(contents)
}

/// write contents to path, creating parent directories if required
pub fn set_filepath_contents (path: impl AsRef<Path>, new_contents: &[u8]) -> Result<()>  {
    let path = path.as_ref();
    if let Some(dir) = path.parent() && !dir.as_os_str().is_empty() {
        ensure_dir( dir)?;
    }
    let mut file = File::create(path)?;
    file.write_all(new_contents)
}
