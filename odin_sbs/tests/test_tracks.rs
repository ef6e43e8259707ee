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

use std::time::Duration;
use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use odin_common::datetime::minutes;
use odin_spline::Parameterization;
use odin_sbs::{*, sbs::{parse_line, SbsLineReader}, track::*};

// run with "cargo test --test test_tracks -- --nocapture"

fn position (hex: &str, time: &str, lat: f64, lon: f64, alt: &str)->SbsMessage {
    let line = format!("MSG,3,111,11111,{hex},111111,2020-01-01,{time},2020-01-01,{time},,{alt},,,{lat},{lon},,,0,0,0,0");
    parse_line( &line).unwrap()
}

fn config_with_gap (max_gap: Duration)->TrackConfig {
    TrackConfig { max_gap, ..TrackConfig::default() }
}

#[test]
fn test_gap_split() {
    let msgs = vec![
        position( "ABC123", "00:00:00", 40.0, -80.0, "10000"),
        position( "ABC123", "01:01:00", 40.1, -80.1, "10000"),
    ];

    let tracks = consolidate( &msgs, &config_with_gap( minutes(30)));
    println!("{tracks:#?}");
    assert_eq!( 2, tracks.len());
    assert!( tracks.iter().all( |t| t.hex_id == "ABC123" && t.keyframes.len() == 1));
    assert_eq!( 40.0, tracks[0].keyframes[0].lat);
    assert_eq!( 40.1, tracks[1].keyframes[0].lat);

    assert_eq!( minutes(30), TrackConfig::default().max_gap);
    assert_eq!( 2, consolidate( &msgs, &TrackConfig::default()).len());
    assert_eq!( 1, consolidate( &msgs, &config_with_gap( minutes(120))).len());
}

#[test]
fn test_gap_split_keeps_segments() {
    let msgs = vec![
        position( "ABC123", "00:00:00", 40.0, -80.0, "10000"),
        position( "ABC123", "00:01:00", 40.01, -80.01, "10100"),
        position( "ABC123", "00:02:00", 40.02, -80.02, "10200"),
        position( "ABC123", "02:00:00", 41.0, -81.0, "5000"),
        position( "ABC123", "02:01:00", 41.01, -81.01, "5100"),
    ];

    let config = config_with_gap( minutes(30));
    let tracks = finalize_tracks( consolidate( &msgs, &config), &config);
    assert_eq!( 2, tracks.len());
    assert_eq!( 3, tracks[0].keyframes.len());
    assert_eq!( 2, tracks[1].keyframes.len());
    assert_eq!( Some(Utc.with_ymd_and_hms( 2020, 1, 1, 0, 0, 0).unwrap()), tracks[0].start);
    assert_eq!( Some(Utc.with_ymd_and_hms( 2020, 1, 1, 0, 2, 0).unwrap()), tracks[0].end);
    assert_eq!( Some(Utc.with_ymd_and_hms( 2020, 1, 1, 2, 0, 0).unwrap()), tracks[1].start);
}

#[test]
fn test_jump_split() {
    let msgs = vec![
        position( "ABC123", "00:00:00", 40.0, -80.0, "10000"),
        position( "ABC123", "00:00:10", 40.01, -80.0, "10000"),
        position( "ABC123", "00:00:20", 45.0, -80.0, "10000"), // ~345mi in 10s
        position( "ABC123", "00:00:30", 45.01, -80.0, "10000"),
    ];

    let config = TrackConfig { max_jump: Some(50.0), ..TrackConfig::default() };
    let tracks = consolidate( &msgs, &config);
    assert_eq!( 2, tracks.len());
    assert_eq!( 2, tracks[0].keyframes.len());
    assert_eq!( 2, tracks[1].keyframes.len());

    assert_eq!( 1, consolidate( &msgs, &TrackConfig::default()).len());
}

#[test]
fn test_finalizer_drops_short_tracks() {
    let msgs = vec![
        position( "AAAAAA", "00:00:00", 40.0, -80.0, "10000"),
        position( "BBBBBB", "00:00:00", 41.0, -80.0, "10000"),
        position( "BBBBBB", "00:00:10", 41.01, -80.0, "10000"),
    ];
    let config = TrackConfig::default();
    let tracks = finalize_tracks( consolidate( &msgs, &config), &config);

    assert_eq!( 1, tracks.len());
    assert_eq!( "BBBBBB", tracks[0].hex_id);

    let config = TrackConfig { min_keyframes: 3, ..TrackConfig::default() };
    assert!( finalize_tracks( consolidate( &msgs, &config), &config).is_empty());
}

#[test]
fn test_start_end_from_keyframes() {
    let air = parse_line( "AIR,,111,11111,CCCCCC,111111,2019-12-31,23:00:00,2019-12-31,23:00:00").unwrap();
    let sta = parse_line( "STA,,111,11111,CCCCCC,111111,2020-01-01,05:00:00,2020-01-01,05:00:00,SL").unwrap();
    let msgs = vec![
        air,
        position( "CCCCCC", "00:00:00", 40.0, -80.0, "10000"),
        position( "CCCCCC", "00:00:10", 40.01, -80.0, "10000"),
        sta,
    ];

    let config = TrackConfig::default();
    let tracks = consolidate( &msgs, &config);
    assert_eq!( Some(Utc.with_ymd_and_hms( 2019, 12, 31, 23, 0, 0).unwrap()), tracks[0].start);
    assert_eq!( Some(Utc.with_ymd_and_hms( 2020, 1, 1, 5, 0, 0).unwrap()), tracks[0].end);

    let tracks = finalize_tracks( tracks, &config);
    assert_eq!( Some(Utc.with_ymd_and_hms( 2020, 1, 1, 0, 0, 0).unwrap()), tracks[0].start);
    assert_eq!( Some(Utc.with_ymd_and_hms( 2020, 1, 1, 0, 0, 10).unwrap()), tracks[0].end);
}

#[test]
fn test_altitude_carry_forward() {
    let alt_only = parse_line( "MSG,5,111,11111,DDDDDD,111111,2020-01-01,00:00:05,2020-01-01,00:00:05,,12000,,,,,,,0,,0,0").unwrap();
    let msgs = vec![
        position( "DDDDDD", "00:00:00", 40.0, -80.0, ""), // nothing to carry forward yet
        alt_only,
        position( "DDDDDD", "00:00:10", 40.01, -80.0, ""),
        position( "DDDDDD", "00:00:20", 40.02, -80.0, "12500"),
        position( "DDDDDD", "00:00:30", 40.03, -80.0, ""),
    ];

    let tracks = consolidate( &msgs, &TrackConfig::default());
    let alts: Vec<f64> = tracks[0].keyframes.iter().map( |kf| kf.alt).collect();
    assert_eq!( vec![0.0, 12000.0, 12500.0, 12500.0], alts);
}

#[test]
fn test_non_keyframe_messages() {
    let msgs = vec![
        // no timestamp
        parse_line( "MSG,3,111,11111,EEEEEE,111111,,,,,,10000,,,40.0,-80.0,,,0,0,0,0").unwrap(),
        // surface position
        parse_line( "MSG,2,111,11111,EEEEEE,111111,2020-01-01,00:00:00,,,,0,10,90,40.0,-80.0,,,,,,-1").unwrap(),
        // no longitude
        parse_line( "MSG,3,111,11111,EEEEEE,111111,2020-01-01,00:00:00,,,,10000,,,40.0,,,,0,0,0,0").unwrap(),
    ];

    let tracks = consolidate( &msgs, &TrackConfig::default());
    assert_eq!( 1, tracks.len());
    assert!( tracks[0].keyframes.is_empty());
}

#[test]
fn test_flight_length() {
    let mut track = PlaneTrack::new("FFFFFF");
    let t = Utc.with_ymd_and_hms( 2020, 1, 1, 0, 0, 0).unwrap();
    track.keyframes.push( LatLon{ time: t, lat: 0.0, lon: 0.0, alt: 0.0 });
    track.keyframes.push( LatLon{ time: t, lat: 0.0, lon: 1.0, alt: 0.0 });
    track.keyframes.push( LatLon{ time: t, lat: 0.0, lon: 1.0, alt: 0.0 }); // identical points add nothing

    let len = flight_length( &track);
    println!("length: {len}mi");
    assert!( (len - 69.09).abs() < 0.1);
}

#[test]
fn test_length_filter() {
    let msgs = vec![
        position( "AAAAAA", "00:00:00", 40.0, -80.0, "10000"),
        position( "AAAAAA", "00:30:00", 45.0, -70.0, "10000"), // ~600mi
        position( "BBBBBB", "00:00:00", 40.0, -80.0, "10000"),
        position( "BBBBBB", "00:10:00", 40.5, -80.5, "10000"),
    ];

    let config = TrackConfig::default();
    let tracks = finalize_tracks( consolidate( &msgs, &config), &config);
    assert_eq!( 1, tracks.len());
    assert_eq!( "BBBBBB", tracks[0].hex_id);

    let config = TrackConfig { max_flight_length: None, ..TrackConfig::default() };
    assert_eq!( 2, finalize_tracks( consolidate( &msgs, &config), &config).len());
}

#[test]
fn test_ordering() {
    let msgs = vec![
        position( "CCCCCC", "00:05:00", 40.0, -80.0, "10000"),
        position( "CCCCCC", "00:06:00", 40.01, -80.0, "10000"),
        position( "BBBBBB", "00:00:00", 40.0, -80.0, "10000"),
        position( "BBBBBB", "00:01:00", 40.01, -80.0, "10000"),
        position( "AAAAAA", "00:00:00", 40.0, -80.0, "10000"),
        position( "AAAAAA", "00:02:00", 40.01, -80.0, "10000"),
    ];

    let config = TrackConfig::default();
    let tracks = finalize_tracks( consolidate( &msgs, &config), &config);
    let ids: Vec<&str> = tracks.iter().map( |t| t.hex_id.as_str()).collect();
    assert_eq!( vec!["AAAAAA", "BBBBBB", "CCCCCC"], ids);

    // same input has to give the same output
    let tracks2 = finalize_tracks( consolidate( &msgs, &config), &config);
    assert_eq!( tracks, tracks2);
}

#[test]
fn test_center_offset() {
    let msgs = vec![
        position( "AAAAAA", "00:00:00", 40.0, -80.0, "10000"),
        position( "AAAAAA", "00:01:00", 40.01, -80.0, "10000"),
        position( "AAAAAA", "00:02:00", 0.0, 0.0, "10000"), // bogus
        position( "AAAAAA", "00:03:00", 40.02, -80.0, "10000"),
        position( "BBBBBB", "00:00:00", 40.0, -80.1, "10000"),
        position( "BBBBBB", "00:01:00", 40.0, -80.2, "10000"),
        position( "BBBBBB", "00:02:00", 40.0, -80.3, "10000"),
        position( "BBBBBB", "00:03:00", 40.0, -80.4, "10000"),
    ];

    // the mean is pulled towards the outlier but the outlier is still much further away
    let config = TrackConfig { max_center_offset: Some(20.0), max_flight_length: None, ..TrackConfig::default() };
    let tracks = finalize_tracks( consolidate( &msgs, &config), &config);
    let a = tracks.iter().find( |t| t.hex_id == "AAAAAA").unwrap();
    assert_eq!( 3, a.keyframes.len());
    assert!( a.keyframes.iter().all( |kf| kf.lat > 39.0));
}

#[test]
fn test_culled_keyframes_are_removed() {
    let msgs = vec![
        position( "AAAAAA", "00:00:00", 40.0, -80.0, "10000"),
        position( "AAAAAA", "00:01:00", 40.01, -80.0, "10000"),
        position( "AAAAAA", "00:02:00", 40.02, -80.0, "10000"),
        position( "AAAAAA", "00:03:00", 40.03, -80.0, "10000"),
        position( "BBBBBB", "00:00:00", 40.0, -80.1, "10000"),
        position( "BBBBBB", "00:01:00", 40.0, -80.2, "10000"),
        position( "BBBBBB", "00:02:00", 40.0, -80.3, "10000"),
        position( "BBBBBB", "00:03:00", 40.0, -80.4, "10000"),
        position( "CCCCCC", "00:00:00", 40.0, -50.0, "10000"),
        position( "CCCCCC", "00:01:00", 40.0, -50.01, "10000"),
    ];

    // center is at about (40.0,-74.1), all of CCCCCC is more than 20deg away
    let config = TrackConfig { max_center_offset: Some(10.0), max_flight_length: None, ..TrackConfig::default() };
    let consolidated = consolidate( &msgs, &config);
    assert_eq!( 3, consolidated.len());

    let tracks = finalize_tracks( consolidated, &config);
    let ids: Vec<&str> = tracks.iter().map( |t| t.hex_id.as_str()).collect();
    println!("remaining tracks: {ids:?}");
    assert_eq!( vec!["AAAAAA", "BBBBBB"], ids);
    assert_eq!( 4, tracks[0].keyframes.len());
    assert_eq!( 4, tracks[1].keyframes.len());
}

#[test]
fn test_sample_log() {
    let config = TrackConfig::default();
    let mut consolidator = TrackConsolidator::new( config.clone());
    for msg in SbsLineReader::open( "resources/sample.sbs", Tz::UTC).unwrap() {
        consolidator.ingest( &msg.unwrap());
    }
    let tracks = finalize_tracks( consolidator.finish(), &config);
    println!("{}", tracks_to_json( &tracks).unwrap());

    assert_eq!( 2, tracks.len());
    assert_eq!( "A04424", tracks[0].hex_id);
    assert_eq!( "AC1FCC", tracks[1].hex_id);

    let alts: Vec<f64> = tracks[0].keyframes.iter().map( |kf| kf.alt).collect();
    assert_eq!( vec![11025.0, 11200.0, 11300.0, 11500.0], alts);
}

#[test]
fn test_json() {
    let msgs = vec![
        position( "AAAAAA", "00:00:00", 40.0, -80.0, "10000"),
        position( "AAAAAA", "00:02:00", 40.01, -80.0, "10500"),
    ];
    let config = TrackConfig::default();
    let tracks = finalize_tracks( consolidate( &msgs, &config), &config);

    let json = tracks_to_json( &tracks).unwrap();
    println!("{json}");
    assert!( json.contains("\"hex_id\": \"AAAAAA\""));
    assert!( json.contains("\"time\": \"2020-01-01T00:02:00Z\""));

    let path = std::env::temp_dir().join("odin_sbs_test_tracks.json");
    write_tracks_json( &path, &tracks).unwrap();
    let tracks2 = read_tracks_json( &path).unwrap();
    std::fs::remove_file( &path);

    assert_eq!( tracks, tracks2);
}

#[test]
fn test_config() {
    let config: TrackConfig = parse_config( r#"
        TrackConfig(
            source_tz: "America/Los_Angeles",
            max_gap: "30m",
            max_jump: Some(100.0),
            parameterization: ChordLength,
        )
    "#).unwrap();
    println!("{config:?}");

    assert_eq!( "America/Los_Angeles", config.source_tz.name());
    assert_eq!( minutes(30), config.max_gap);
    assert_eq!( Some(100.0), config.max_jump);
    assert_eq!( 2, config.min_keyframes);
    assert_eq!( Some(500.0), config.max_flight_length);
    assert_eq!( Parameterization::ChordLength, config.parameterization);

    let config: TrackConfig = load_config( "configs/sbs_tracks.ron").unwrap();
    assert_eq!( minutes(60), config.max_gap);
    assert_eq!( Some(10.0), config.max_center_offset);

    assert!( matches!( parse_config::<TrackConfig>( "TrackConfig( max_gap: 42 )"), Err(OdinSbsError::ConfigError(_))));
}
