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
#![allow(unused)]

use std::time::Duration;
use chrono::{FixedOffset, NaiveDate, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use odin_common::datetime::*;

// run with "cargo test --test test_datetime -- --nocapture"

#[test]
fn test_lenient_parsing() {
    let d = NaiveDate::from_ymd_opt( 2016, 3, 11).unwrap();
    assert_eq!( Some(d), parse_naive_date("2016/03/11"));
    assert_eq!( Some(d), parse_naive_date(" 2016-03-11 "));
    assert_eq!( None, parse_naive_date("11.03.2016"));
    assert_eq!( None, parse_naive_date(""));

    let t = parse_naive_time("13:07:05.343").unwrap();
    assert_eq!( "13:07:05.343", t.format("%H:%M:%S%.3f").to_string());
    assert!( parse_naive_time("13:07").is_some());
    assert!( parse_naive_time("25:00:00").is_none());

    assert!( parse_naive_date_time( "2016/03/11", "").is_none());
}

#[test]
fn test_local_time() {
    let utc = parse_utc_date_time( "2016/03/11", "13:07:05", &Utc).unwrap();
    assert_eq!( Utc.with_ymd_and_hms( 2016, 3, 11, 13, 7, 5).unwrap(), utc);

    let pst = FixedOffset::west_opt( 8 * 3600).unwrap();
    let dt = parse_utc_date_time( "2016/03/11", "13:07:05", &pst).unwrap();
    println!("13:07:05 PST = {dt}");
    assert_eq!( Utc.with_ymd_and_hms( 2016, 3, 11, 21, 7, 5).unwrap(), dt);
}

#[test]
fn test_time_spans() {
    let start = Utc.with_ymd_and_hms( 2020, 1, 1, 0, 0, 0).unwrap();
    let end = start + TimeDelta::minutes(60);

    assert_eq!( 3600.0, secs_between( &end, &start));
    assert_eq!( -3600.0, secs_between( &start, &end));

    assert_eq!( 0.25, elapsed_fraction( &(start + TimeDelta::minutes(15)), &start, &end));
    assert_eq!( 1.5, elapsed_fraction( &(start + TimeDelta::minutes(90)), &start, &end));
    assert_eq!( 0.0, elapsed_fraction( &end, &start, &start));

    assert!( exceeds_duration( &(start + TimeDelta::minutes(61)), &start, &minutes(60)));
    assert!( !exceeds_duration( &end, &start, &minutes(60)));
    assert!( !exceeds_duration( &start, &end, &minutes(1)));
    assert!( !exceeds_duration( &end, &start, &Duration::MAX));
}

#[derive(Debug,Serialize,Deserialize)]
struct Interval {
    #[serde(serialize_with = "serialize_duration", deserialize_with = "deserialize_duration")]
    dur: Duration,
}

#[test]
fn test_duration_serde() {
    let iv: Interval = serde_json::from_str( r#"{ "dur": "90m" }"#).unwrap();
    assert_eq!( minutes(90), iv.dur);

    let json = serde_json::to_string( &iv).unwrap();
    println!("{json}");
    let iv2: Interval = serde_json::from_str( &json).unwrap();
    assert_eq!( iv.dur, iv2.dur);

    assert!( serde_json::from_str::<Interval>( r#"{ "dur": "soon" }"#).is_err());
}
