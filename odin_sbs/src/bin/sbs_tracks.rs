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

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use odin_common::fs::has_extension;
use odin_sbs::{
    init_tracing, load_config,
    codec::{MessageArchiveReader, MessageArchiveWriter},
    sbs::SbsLineReader,
    track::{finalize_tracks, write_tracks_json, TrackConfig, TrackConsolidator},
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "reconstruct aircraft tracks from SBS logs")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// consolidate and finalize tracks of an SBS log (text, .gz or .sbsb archive) and export them as JSON
    Export {
        /// output file
        #[arg(short, long, default_value = "keyframes.json")]
        output: String,

        /// RON track config (defaults if not set)
        #[arg(short, long)]
        config: Option<String>,

        path: String,
    },

    /// convert a text SBS log into a binary message archive
    Pack {
        /// timezone of message source
        #[arg(long, default_value = "UTC")]
        tz: String,

        #[arg(short, long)]
        output: String,

        path: String,
    },
}

fn main()->Result<()> {
    init_tracing();
    let args = Args::parse();

    match args.cmd {
        Command::Export{ output, config, path } => export( &path, &output, config.as_deref()),
        Command::Pack{ tz, output, path } => pack( &path, &output, &tz),
    }
}

fn export (path: &str, output: &str, config: Option<&str>)->Result<()> {
    let config: TrackConfig = match config {
        Some(config_path) => load_config( config_path)?,
        None => TrackConfig::default()
    };

    let mut consolidator = TrackConsolidator::new( config.clone());

    if has_extension( &path, "sbsb") {
        for msg in MessageArchiveReader::open( path)? {
            consolidator.ingest( &msg?);
        }
    } else {
        let mut reader = SbsLineReader::open( path, config.source_tz)?;
        for msg in reader.by_ref() {
            consolidator.ingest( &msg?);
        }
        reader.log_stats();
    }

    let tracks = finalize_tracks( consolidator.finish(), &config);
    write_tracks_json( output, &tracks)?;
    println!("exported {} tracks to {}", tracks.len(), output);

    Ok(())
}

fn pack (path: &str, output: &str, tz: &str)->Result<()> {
    let tz: chrono_tz::Tz = tz.parse().map_err( |e| anyhow::anyhow!("invalid timezone {}: {}", tz, e))?;

    let mut reader = SbsLineReader::open( path, tz)?;
    let mut writer = MessageArchiveWriter::create( output)?;
    for msg in reader.by_ref() {
        writer.write( &msg?)?;
    }
    reader.log_stats();

    let (n_messages, n_bytes) = (writer.n_messages(), writer.n_bytes());
    writer.finish()?;
    println!("packed {} messages ({} bytes) into {}", n_messages, n_bytes, output);

    Ok(())
}
