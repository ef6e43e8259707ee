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

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;
use parse_duration::parse;

// for simple use cases that do not require to handle leap seconds and the like we provide our own wrappers
#[inline] pub fn minutes (n: u64)->Duration { Duration::from_secs(n * 60) }

const DATE_FORMATS: [&str;2] = ["%Y/%m/%d", "%Y-%m-%d"];
const TIME_FORMATS: [&str;2] = ["%H:%M:%S%.f", "%H:%M"];

/// lenient date parsing for log formats that use either '/' or '-' separated dates
pub fn parse_naive_date (s: &str)->Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS.iter().find_map( |fmt| NaiveDate::parse_from_str( s, fmt).ok())
}

/// lenient time-of-day parsing (with or without seconds and fractional seconds)
pub fn parse_naive_time (s: &str)->Option<NaiveTime> {
    let s = s.trim();
    TIME_FORMATS.iter().find_map( |fmt| NaiveTime::parse_from_str( s, fmt).ok())
}

/// parse separate date and time fields. Returns None if either one is missing or malformed
pub fn parse_naive_date_time (date: &str, time: &str)->Option<NaiveDateTime> {
    let date = parse_naive_date(date)?;
    let time = parse_naive_time(time)?;
    Some( date.and_time(time))
}

/// interpret a naive (local) datetime in the given timezone and convert to Utc.
/// Ambiguous local times (DST fall back) resolve to the later instant, non-existing ones (DST spring forward) to None
pub fn local_to_utc<Tz: TimeZone> (ndt: &NaiveDateTime, tz: &Tz)->Option<DateTime<Utc>> {
    match tz.from_local_datetime( ndt) {
        LocalResult::Single(dt) => Some( dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(_, dt2) => Some( dt2.with_timezone(&Utc)), // we don't care about that precision
        LocalResult::None => None
    }
}

pub fn parse_utc_date_time<Tz: TimeZone> (date: &str, time: &str, tz: &Tz)->Option<DateTime<Utc>> {
    parse_naive_date_time( date, time).and_then( |ndt| local_to_utc( &ndt, tz))
}

/// signed time difference in fractional seconds
#[inline]
pub fn secs_between (later: &DateTime<Utc>, earlier: &DateTime<Utc>)->f64 {
    let dt: TimeDelta = *later - *earlier;
    dt.num_milliseconds() as f64 / 1000.0
}

/// fraction of elapsed time in [start,end] (not clamped). Returns 0 for empty intervals
pub fn elapsed_fraction (t: &DateTime<Utc>, start: &DateTime<Utc>, end: &DateTime<Utc>)->f64 {
    let span = secs_between( end, start);
    if span > 0.0 { secs_between( t, start) / span } else { 0.0 }
}

/// does the (signed) difference later-earlier exceed the given duration
pub fn exceeds_duration (later: &DateTime<Utc>, earlier: &DateTime<Utc>, dur: &Duration)->bool {
    match TimeDelta::from_std( *dur) {
        Ok(max) => (*later - *earlier) > max,
        Err(_) => false // dur is beyond what TimeDelta can represent, nothing exceeds it
    }
}

//--- support for serde

pub fn serialize_duration<S: Serializer> (dur: &Duration, s: S) -> Result<S::Ok, S::Error>  {
    let dfm = format!("{:?}", dur);
    s.serialize_str(&dfm)
}

pub fn deserialize_duration <'a,D>(deserializer: D) -> Result<Duration,D::Error>
    where D: Deserializer<'a>
{
    String::deserialize(deserializer).and_then( |string| {
        parse(string.as_str())
            .map_err( |e| serde::de::Error::custom(format!("{:?}",e)))
    })
}
