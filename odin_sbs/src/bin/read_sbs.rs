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
use chrono_tz::Tz;
use clap::Parser;
use odin_common::fs::read_lines;
use odin_sbs::{init_tracing, aircraft::AircraftTable, sbs::parse_line_in_tz};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "SBS (BaseStation) log file monitoring tool")]
pub struct Args {
    /// timezone of message source
    #[arg(long, default_value = "UTC")]
    pub tz: String,

    /// only print the final aircraft table
    #[arg(long)]
    pub table: bool,

    /// SBS log file (can be gzipped)
    pub path: String,
}

fn main()->Result<()> {
    init_tracing();
    let args = Args::parse();
    let tz: Tz = args.tz.parse().map_err( |e| anyhow::anyhow!("invalid timezone {}: {}", args.tz, e))?;

    let mut table = AircraftTable::new();

    for line in read_lines( &args.path)? {
        let line = line?;
        if line.trim().is_empty() { continue }

        match parse_line_in_tz( &line, &tz) {
            Ok(msg) => {
                if args.table {
                    table.update( &msg);
                } else {
                    println!("{msg}");
                }
            }
            Err(e) => if !args.table { println!("PARSE ERROR for {}: {}", line, e) }
        }
    }

    if args.table {
        for ac in table.sorted() {
            println!("{ac}");
        }
        println!("{} aircraft", table.len());
    }

    Ok(())
}
