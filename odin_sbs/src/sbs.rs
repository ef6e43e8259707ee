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

use std::{collections::BTreeMap, fmt, io::{BufRead, Lines}, path::Path, str::FromStr};
use chrono::{DateTime, SubsecRound, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::{debug, info};
use odin_common::{datetime::parse_utc_date_time, fs::open_buffered};

use crate::errors::{OdinSbsError, Result};
use crate::msg::{AircraftStatus, MessageType, MsgHeader, SbsMessage, TransmissionData};

/// number of fields that are common to all SBS messages
pub const N_COMMON_FIELDS: usize = 10;

/// SBS as documented on http://woodair.net/SBS/Article/Barebones42_Socket_Data.htm
///
/// Message examples:
///  MSG,1,111,11111,AA2BC2,111111,2016/03/11,13:07:16.663,2016/03/11,13:07:16.626,UAL814  ,,,,,,,,,,,0
///  MSG,3,111,11111,A04424,111111,2016/03/11,13:07:05.343,2016/03/11,13:07:05.288,,11025,,,37.17274,-122.03935,,,,,,0
///  STA,,5,179,400AE7,10103,2008/11/28,14:58:51.153,2008/11/28,14:58:51.153,RM
///
/// fields:
///   0: message type (MSG, SEL, ID, AIR, STA, CLK)
///   1: transmission type (MSG only: 1-8)
///   2: DB session id
///   3: DB aircraft id (CLK: -1)
///   4: ICAO 24 bit id (mode S transponder code)
///   5: DB flight id (CLK: -1)
///   6: date generated
///   7: time generated
///   8: date logged
///   9: time logged
///  10: callsign (MSG, ID, SEL) or status code (STA)
///  11: mode-C altitude [ft]
///  12: ground speed [kn]
///  13: track (from vx,vy, *not* heading)
///  14: latitude
///  15: longitude
///  16: vertical rate [ft/min]
///  17: squawk (mode-A code)
///  18: alert (flag indicating squawk has changed)
///  19: emergency (flag)
///  20: spi (flag, transponder ident activated)
///  21: on ground (flag)
///
/// Fields are trimmed and upper-cased. Empty or unparsable numeric fields are not errors, they just
/// remain unset. Timestamps are interpreted as UTC
pub fn parse_line (line: &str)->Result<SbsMessage> {
    parse_line_in_tz( line, &Utc)
}

/// parse a line whose timestamps are in the local time of the given timezone (dump1090 reports
/// local time) and convert them to UTC
pub fn parse_line_in_tz<T: TimeZone> (line: &str, tz: &T)->Result<SbsMessage> {
    let fields: Vec<String> = line.split(',').map( |s| s.trim().to_uppercase()).collect();
    if fields.len() < N_COMMON_FIELDS {
        return Err( OdinSbsError::Truncated( fields.len()))
    }

    let msg_type = MessageType::from_tag( &fields[0])
        .ok_or_else( || OdinSbsError::UnknownMessageType( fields[0].clone()))?;

    match msg_type {
        MessageType::NewAircraft => {
            let header = parse_header( &fields, tz);
            Ok( SbsMessage::NewAircraft{ header } )
        }
        MessageType::NewId => {
            let header = parse_header( &fields, tz);
            Ok( SbsMessage::NewId{ header, callsign: get(&fields, 10).to_string() } )
        }
        MessageType::SelectionChange => {
            let header = parse_header( &fields, tz);
            Ok( SbsMessage::SelectionChange{ header, callsign: get(&fields, 10).to_string() } )
        }
        MessageType::StatusChange => {
            let code = get(&fields, 10);
            let status = AircraftStatus::from_code( code)
                .ok_or_else( || OdinSbsError::UnknownStatusCode( code.to_string()))?;
            let header = parse_header( &fields, tz);
            Ok( SbsMessage::StatusChange{ header, status } )
        }
        MessageType::Click => {
            if get(&fields, 3) != "-1" || get(&fields, 5) != "-1" {
                return Err( OdinSbsError::InvariantViolation(
                    format!("CLK aircraft and flight ids have to be -1, got '{}' and '{}'", get(&fields, 3), get(&fields, 5))))
            }
            let header = parse_header( &fields, tz);
            Ok( SbsMessage::Click{ header } )
        }
        MessageType::Transmission => {
            let tx = get(&fields, 1);
            let transmission_type_id = if tx.is_empty() {
                0
            } else {
                match tx.parse::<u8>() {
                    Ok(id) if id <= 8 => id,
                    _ => return Err( OdinSbsError::InvalidTransmissionType( tx.to_string()))
                }
            };

            let mut header = parse_header( &fields, tz);
            header.transmission_type_id = transmission_type_id;
            let data = parse_transmission_data( &fields);
            Ok( SbsMessage::Transmission{ header, data } )
        }
    }
}

// all header fields are lenient. The transmission type is only checked for MSG
fn parse_header<T: TimeZone> (fields: &[String], tz: &T)->MsgHeader {
    MsgHeader {
        transmission_type_id: field::<u8>( fields, 1).filter( |id| *id <= 8).unwrap_or(0),
        session_id: field( fields, 2).unwrap_or(0),
        aircraft_id: field( fields, 3).unwrap_or(0),
        hex_id: get( fields, 4).to_string(),
        flight_id: field( fields, 5).unwrap_or(0),
        generated_at: timestamp( fields, 6, tz),
        logged_at: timestamp( fields, 8, tz),
    }
}

fn parse_transmission_data (fields: &[String])->TransmissionData {
    let callsign = get( fields, 10);

    TransmissionData {
        callsign: if callsign.is_empty() { None } else { Some(callsign.to_string()) },
        altitude: number( fields, 11),
        ground_speed: number( fields, 12),
        ground_track: number( fields, 13),
        latitude: number( fields, 14),
        longitude: number( fields, 15),
        vertical_rate: number( fields, 16),
        squawk: field( fields, 17),
        alert: flag( fields, 18),
        emergency: flag( fields, 19),
        spi: flag( fields, 20),
        is_on_ground: flag( fields, 21),
    }
}

#[inline]
fn get (fields: &[String], idx: usize)->&str {
    fields.get(idx).map( |s| s.as_str()).unwrap_or("")
}

#[inline]
fn field<T: FromStr> (fields: &[String], idx: usize)->Option<T> {
    let s = get( fields, idx);
    if s.is_empty() { None } else { s.parse::<T>().ok() }
}

// "NAN" and "INF" would parse as f64 but are not data
#[inline]
fn number (fields: &[String], idx: usize)->Option<f64> {
    field::<f64>( fields, idx).filter( |v| v.is_finite())
}

/// date and time fields starting at idx. We only keep millisecond resolution
fn timestamp<T: TimeZone> (fields: &[String], idx: usize, tz: &T)->Option<DateTime<Utc>> {
    parse_utc_date_time( get(fields, idx), get(fields, idx+1), tz).map( |dt| dt.trunc_subsecs(3))
}

// dump1090 uses -1 for set flags, BaseStation uses 1
#[inline]
fn flag (fields: &[String], idx: usize)->Option<bool> {
    let s = get( fields, idx);
    if s.is_empty() { None } else { Some( s == "1" || s == "-1") }
}

/* #region line reader ****************************************************************************/

/// counters for lines processed by a [`SbsLineReader`]
#[derive(Debug,Clone,Default)]
pub struct ParseStats {
    pub n_lines: usize,
    pub n_empty: usize,
    pub n_messages: usize,
    pub skipped: BTreeMap<&'static str,usize>, // error category -> count
}

impl ParseStats {
    pub fn n_skipped (&self)->usize {
        self.skipped.values().sum()
    }

    fn record_error (&mut self, e: &OdinSbsError) {
        *self.skipped.entry( e.category()).or_insert(0) += 1;
    }
}

impl fmt::Display for ParseStats {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!( f, "{} lines, {} messages, {} empty, {} skipped", self.n_lines, self.n_messages, self.n_empty, self.n_skipped())?;
        if !self.skipped.is_empty() {
            write!( f, " {:?}", self.skipped)?;
        }
        Ok(())
    }
}

/// iterator over the messages of a line oriented SBS source. Lines that cannot be decoded are logged
/// and skipped, only I/O errors are passed on
pub struct SbsLineReader<R: BufRead> {
    lines: Lines<R>,
    tz: Tz,
    stats: ParseStats,
}

impl SbsLineReader<Box<dyn BufRead>> {
    /// open a (possibly gzipped) SBS log file
    pub fn open (path: impl AsRef<Path>, tz: Tz)->Result<Self> {
        let reader = open_buffered( path)?;
        Ok( SbsLineReader::new( reader, tz) )
    }
}

impl<R: BufRead> SbsLineReader<R> {
    pub fn new (reader: R, tz: Tz)->Self {
        SbsLineReader { lines: reader.lines(), tz, stats: ParseStats::default() }
    }

    pub fn stats (&self)->&ParseStats { &self.stats }

    pub fn log_stats (&self) {
        info!("parsed SBS input: {}", self.stats);
    }
}

impl<R: BufRead> Iterator for SbsLineReader<R> {
    type Item = Result<SbsMessage>;

    fn next (&mut self)->Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some( Err( e.into()))
            };
            self.stats.n_lines += 1;

            if line.trim().is_empty() {
                self.stats.n_empty += 1;
                continue
            }

            match parse_line_in_tz( &line, &self.tz) {
                Ok(msg) => {
                    self.stats.n_messages += 1;
                    return Some( Ok(msg))
                }
                Err(e) => {
                    debug!("skipping line {}: {} ({})", self.stats.n_lines, e, line);
                    self.stats.record_error( &e);
                }
            }
        }
    }
}

/* #endregion line reader */
