/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
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
#![allow(unused)]

//! compact binary encoding of [`SbsMessage`] values that can be re-ingested without text parsing.
//!
//! All numbers are little endian. Each message starts with a type tag byte, followed by the
//! transmission type id (u8), session id (i32), aircraft id (i32), hex id (string), flight id (i32),
//! generated and logged timestamps (i64 epoch millis, `i64::MIN` if not set) and then the variant
//! specific fields in declaration order. Strings are prefixed with their u32 byte length. Optional
//! values are preceded by a presence byte (0 or 1) and only written if present.
//!
//! Archives are plain concatenations of encoded messages. They are written and read incrementally,
//! so neither side ever holds more than a small buffer of the archive in memory.

use std::{fs::File, io::{self, BufRead, BufWriter, ErrorKind, Read, Write}, path::Path};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use chrono::{DateTime, Utc};
use odin_common::fs::{ensure_dir, open_buffered};

use crate::errors::{OdinSbsError, Result, binary_format_error};
use crate::msg::{AircraftStatus, MessageType, MsgHeader, SbsMessage, TransmissionData};

const UNSET_TIME: i64 = i64::MIN;

impl SbsMessage {

    pub fn write_to<B: BufMut> (&self, buf: &mut B) {
        buf.put_u8( self.msg_type().code());
        write_header( buf, self.header());

        match self {
            SbsMessage::NewAircraft{..} | SbsMessage::Click{..} => {}
            SbsMessage::NewId{callsign,..} | SbsMessage::SelectionChange{callsign,..} => put_string( buf, callsign),
            SbsMessage::StatusChange{status,..} => buf.put_u8( status.to_byte()),
            SbsMessage::Transmission{data,..} => write_transmission_data( buf, data),
        }
    }

    pub fn to_bytes (&self)->Bytes {
        let mut buf = BytesMut::with_capacity(128);
        self.write_to( &mut buf);
        buf.freeze()
    }

    /// decode the next message from buf. Malformed or short input is reported as `BinaryFormat` error
    pub fn read_from<B: Buf> (buf: &mut B)->Result<SbsMessage> {
        Ok( decode( buf)? )
    }
}

/// decoding failures. Running out of input is kept apart so that streaming readers know when to refill
#[derive(Debug)]
enum DecodeError {
    Short(usize),    // number of missing bytes
    Invalid(String),
}

type DecodeResult<T> = std::result::Result<T,DecodeError>;

impl From<DecodeError> for OdinSbsError {
    fn from (e: DecodeError)->Self {
        match e {
            DecodeError::Short(n) => binary_format_error!("unexpected end of input, {} more bytes required", n),
            DecodeError::Invalid(msg) => binary_format_error!("{}", msg),
        }
    }
}

fn decode<B: Buf> (buf: &mut B)->DecodeResult<SbsMessage> {
    let tag = get_u8( buf)?;
    let msg_type = MessageType::from_code( tag).ok_or_else( || DecodeError::Invalid( format!("unknown message tag {}", tag)))?;
    let header = read_header( buf)?;

    let msg = match msg_type {
        MessageType::NewAircraft => SbsMessage::NewAircraft{ header },
        MessageType::NewId => SbsMessage::NewId{ header, callsign: get_string( buf)? },
        MessageType::SelectionChange => SbsMessage::SelectionChange{ header, callsign: get_string( buf)? },
        MessageType::StatusChange => {
            let b = get_u8( buf)?;
            let status = AircraftStatus::from_byte( b).ok_or_else( || DecodeError::Invalid( format!("unknown status {}", b)))?;
            SbsMessage::StatusChange{ header, status }
        }
        MessageType::Click => SbsMessage::Click{ header },
        MessageType::Transmission => SbsMessage::Transmission{ header, data: read_transmission_data( buf)? },
    };
    Ok(msg)
}

/* #region archive writer *************************************************************************/

/// incremental writer for message archives. Each message is encoded into a reused buffer and then
/// passed on to the underlying writer
pub struct MessageArchiveWriter<W: Write> {
    out: W,
    buf: BytesMut,
    n_messages: usize,
    n_bytes: usize,
}

impl MessageArchiveWriter<BufWriter<File>> {
    /// create (or truncate) an archive file, including missing parent directories
    pub fn create (path: impl AsRef<Path>)->Result<Self> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() && !dir.as_os_str().is_empty() {
            ensure_dir( dir)?;
        }
        let file = File::create( path)?;
        Ok( MessageArchiveWriter::new( BufWriter::new( file)) )
    }
}

impl<W: Write> MessageArchiveWriter<W> {
    pub fn new (out: W)->Self {
        MessageArchiveWriter { out, buf: BytesMut::with_capacity(256), n_messages: 0, n_bytes: 0 }
    }

    pub fn write (&mut self, msg: &SbsMessage)->Result<()> {
        self.buf.clear();
        msg.write_to( &mut self.buf);
        self.out.write_all( &self.buf)?;

        self.n_messages += 1;
        self.n_bytes += self.buf.len();
        Ok(())
    }

    pub fn n_messages (&self)->usize { self.n_messages }

    pub fn n_bytes (&self)->usize { self.n_bytes }

    /// flush and return the underlying writer
    pub fn finish (mut self)->Result<W> {
        self.out.flush()?;
        Ok( self.out )
    }
}

/* #endregion archive writer */

/* #region archive reader *************************************************************************/

const READ_CHUNK: usize = 8192;

/// iterator over the messages of an archive that is read incrementally from `R`. Iteration stops after
/// the first decoding error since we cannot re-synchronize with the following message
pub struct MessageArchiveReader<R: Read> {
    reader: R,
    buf: BytesMut,
    eof: bool,
    failed: bool,
}

impl MessageArchiveReader<Box<dyn BufRead>> {
    /// open a (possibly gzipped) archive file
    pub fn open (path: impl AsRef<Path>)->Result<Self> {
        Ok( MessageArchiveReader::new( open_buffered( path)?) )
    }
}

impl<R: Read> MessageArchiveReader<R> {
    pub fn new (reader: R)->Self {
        MessageArchiveReader { reader, buf: BytesMut::with_capacity( READ_CHUNK), eof: false, failed: false }
    }

    /// number of bytes that were read but not yet decoded
    pub fn buffered (&self)->usize { self.buf.len() }

    // append the next chunk of input. Returns the number of bytes read, 0 at the end of input
    fn fill (&mut self)->io::Result<usize> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match self.reader.read( &mut chunk) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(0)
                }
                Ok(n) => {
                    self.buf.extend_from_slice( &chunk[..n]);
                    return Ok(n)
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e)
            }
        }
    }
}

impl<R: Read> Iterator for MessageArchiveReader<R> {
    type Item = Result<SbsMessage>;

    fn next (&mut self)->Option<Self::Item> {
        loop {
            if self.failed { return None }

            if !self.buf.is_empty() {
                let mut view: &[u8] = &self.buf;
                match decode( &mut view) {
                    Ok(msg) => {
                        let n = self.buf.len() - view.len();
                        self.buf.advance( n);
                        return Some( Ok(msg))
                    }
                    Err(DecodeError::Short(_)) if !self.eof => {} // partial message, read more
                    Err(e) => {
                        self.failed = true;
                        return Some( Err( e.into()))
                    }
                }
            } else if self.eof {
                return None
            }

            if let Err(e) = self.fill() {
                self.failed = true;
                return Some( Err( e.into()))
            }
        }
    }
}

/* #endregion archive reader */

//--- header and transmission fields

fn write_header<B: BufMut> (buf: &mut B, header: &MsgHeader) {
    buf.put_u8( header.transmission_type_id);
    buf.put_i32_le( header.session_id);
    buf.put_i32_le( header.aircraft_id);
    put_string( buf, &header.hex_id);
    buf.put_i32_le( header.flight_id);
    put_time( buf, &header.generated_at);
    put_time( buf, &header.logged_at);
}

fn read_header<B: Buf> (buf: &mut B)->DecodeResult<MsgHeader> {
    Ok( MsgHeader {
        transmission_type_id: get_u8( buf)?,
        session_id: get_i32( buf)?,
        aircraft_id: get_i32( buf)?,
        hex_id: get_string( buf)?,
        flight_id: get_i32( buf)?,
        generated_at: get_time( buf)?,
        logged_at: get_time( buf)?,
    })
}

fn write_transmission_data<B: BufMut> (buf: &mut B, data: &TransmissionData) {
    put_opt( buf, &data.callsign, |buf,v| put_string( buf, v));
    put_opt( buf, &data.altitude, |buf,v| buf.put_f64_le(*v));
    put_opt( buf, &data.ground_speed, |buf,v| buf.put_f64_le(*v));
    put_opt( buf, &data.ground_track, |buf,v| buf.put_f64_le(*v));
    put_opt( buf, &data.latitude, |buf,v| buf.put_f64_le(*v));
    put_opt( buf, &data.longitude, |buf,v| buf.put_f64_le(*v));
    put_opt( buf, &data.vertical_rate, |buf,v| buf.put_f64_le(*v));
    put_opt( buf, &data.squawk, |buf,v| buf.put_i32_le(*v));
    put_opt( buf, &data.alert, |buf,v| buf.put_u8(*v as u8));
    put_opt( buf, &data.emergency, |buf,v| buf.put_u8(*v as u8));
    put_opt( buf, &data.spi, |buf,v| buf.put_u8(*v as u8));
    put_opt( buf, &data.is_on_ground, |buf,v| buf.put_u8(*v as u8));
}

fn read_transmission_data<B: Buf> (buf: &mut B)->DecodeResult<TransmissionData> {
    Ok( TransmissionData {
        callsign: get_opt( buf, get_string)?,
        altitude: get_opt( buf, get_f64)?,
        ground_speed: get_opt( buf, get_f64)?,
        ground_track: get_opt( buf, get_f64)?,
        latitude: get_opt( buf, get_f64)?,
        longitude: get_opt( buf, get_f64)?,
        vertical_rate: get_opt( buf, get_f64)?,
        squawk: get_opt( buf, get_i32)?,
        alert: get_opt( buf, get_bool)?,
        emergency: get_opt( buf, get_bool)?,
        spi: get_opt( buf, get_bool)?,
        is_on_ground: get_opt( buf, get_bool)?,
    })
}

//--- primitives. Buf getters panic on short input so we have to check remaining() first

fn ensure<B: Buf> (buf: &B, n: usize)->DecodeResult<()> {
    if buf.remaining() < n {
        Err( DecodeError::Short( n - buf.remaining()))
    } else {
        Ok(())
    }
}

fn get_u8<B: Buf> (buf: &mut B)->DecodeResult<u8> {
    ensure( buf, 1)?;
    Ok( buf.get_u8())
}

fn get_bool<B: Buf> (buf: &mut B)->DecodeResult<bool> {
    match get_u8( buf)? {
        0 => Ok(false),
        1 => Ok(true),
        b => Err( DecodeError::Invalid( format!("invalid bool {}", b)))
    }
}

fn get_i32<B: Buf> (buf: &mut B)->DecodeResult<i32> {
    ensure( buf, 4)?;
    Ok( buf.get_i32_le())
}

fn get_f64<B: Buf> (buf: &mut B)->DecodeResult<f64> {
    ensure( buf, 8)?;
    Ok( buf.get_f64_le())
}

fn put_string<B: BufMut> (buf: &mut B, s: &str) {
    buf.put_u32_le( s.len() as u32);
    buf.put_slice( s.as_bytes());
}

fn get_string<B: Buf> (buf: &mut B)->DecodeResult<String> {
    ensure( buf, 4)?;
    let len = buf.get_u32_le() as usize;
    ensure( buf, len)?;

    let mut bs = vec![0u8; len];
    buf.copy_to_slice( &mut bs);
    String::from_utf8( bs).map_err( |e| DecodeError::Invalid( format!("invalid string: {}", e)))
}

fn put_time<B: BufMut> (buf: &mut B, date: &Option<DateTime<Utc>>) {
    buf.put_i64_le( date.map( |d| d.timestamp_millis()).unwrap_or( UNSET_TIME));
}

fn get_time<B: Buf> (buf: &mut B)->DecodeResult<Option<DateTime<Utc>>> {
    ensure( buf, 8)?;
    let millis = buf.get_i64_le();
    if millis == UNSET_TIME {
        Ok(None)
    } else {
        DateTime::from_timestamp_millis( millis)
            .map( Some)
            .ok_or_else( || DecodeError::Invalid( format!("timestamp out of range: {}", millis)))
    }
}

fn put_opt<B: BufMut, T, F> (buf: &mut B, opt: &Option<T>, put: F) where F: FnOnce(&mut B,&T) {
    match opt {
        Some(v) => {
            buf.put_u8(1);
            put( buf, v);
        }
        None => buf.put_u8(0)
    }
}

fn get_opt<B: Buf, T, F> (buf: &mut B, get: F)->DecodeResult<Option<T>> where F: FnOnce(&mut B)->DecodeResult<T> {
    match get_u8( buf)? {
        0 => Ok(None),
        1 => get( buf).map( Some),
        b => Err( DecodeError::Invalid( format!("invalid presence flag {}", b)))
    }
}
