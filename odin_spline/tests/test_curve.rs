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

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use odin_common::cartesian3::Cartesian3;
use odin_spline::*;

// run with "cargo test --test test_curve -- --nocapture"

fn p (x: f64, y: f64, z: f64)->Cartesian3 { Cartesian3::new(x,y,z) }

#[test]
fn test_chord_length() {
    let pts = [p(0.0,0.0,0.0), p(3.0,4.0,0.0), p(3.0,4.0,12.0)];
    let curve = Curve3::with_chord_length( &pts).unwrap();
    println!("params: {:?}", curve.params());

    assert_eq!( 17.0, curve.length());
    assert_eq!( 3, curve.n_points());
    assert_eq!( 0.0, curve.params()[0]);
    assert_eq!( 1.0, curve.params()[2]);
    assert!( (curve.params()[1] - 5.0/17.0).abs() < 1e-12);

    assert_eq!( pts[0], curve.point(0.0));
    assert_eq!( pts[1], curve.point( curve.params()[1]));
    assert_eq!( pts[2], curve.point(1.0));

    // clamped outside of [0,1]
    assert_eq!( pts[0], curve.point(-0.3));
    assert_eq!( pts[2], curve.point(1.7));
    assert_eq!( Some(pts[1]), curve.control_point(1));
    assert_eq!( None, curve.control_point(3));
}

#[test]
fn test_elapsed_time() {
    let t0 = Utc.with_ymd_and_hms( 2016, 3, 11, 13, 7, 0).unwrap();
    let pts = [
        (t0, p(0.0,0.0,0.0)),
        (t0 + TimeDelta::seconds(60), p(1.0,1.0,1.0)),
        (t0 + TimeDelta::seconds(180), p(2.0,0.0,4.0)),
    ];
    let curve = Curve3::with_elapsed_time( &pts).unwrap();
    println!("params: {:?}", curve.params());

    assert_eq!( &[0.0, 1.0/3.0, 1.0], curve.params());
    assert_eq!( pts[1].1, curve.point(1.0/3.0));
    assert_eq!( pts[2].1, curve.point(1.0));

    let chord = Curve3::fit( &pts, Parameterization::ChordLength).unwrap();
    assert_eq!( curve.length(), chord.length());
    assert!( chord.params()[1] != curve.params()[1]);
}

#[test]
fn test_close_keyframes_in_long_track() {
    // two keyframes 20ms apart in a 10h track are less than 1e-6 apart in parameter space
    let t0 = Utc.with_ymd_and_hms( 2020, 1, 1, 0, 0, 0).unwrap();
    let at = |ms: i64| (t0 + TimeDelta::milliseconds(ms), p( ms as f64 / 100_000.0, 0.0, 0.0));
    let pts = [ at(0), at(18_000_000), at(18_000_020), at(36_000_000) ];

    let curve = Curve3::with_elapsed_time( &pts).unwrap();
    let (p1, p2) = (curve.params()[1], curve.params()[2]);
    println!("narrow segment: [{p1},{p2}]");
    assert!( p2 - p1 < 1e-6);

    let x_mid = curve.point( (p1 + p2) / 2.0).x;
    assert!( (x_mid - 180.0001).abs() < 1e-6, "x in narrow segment: {x_mid}");

    let x_before = curve.point( p2 - 1e-12).x;
    assert!( (x_before - curve.point(p2).x).abs() < 1e-5, "jump at knot: {x_before}");
}

#[test]
fn test_degenerate_inputs() {
    let pts = [p(1.0,2.0,3.0); 3];
    let curve = Curve3::with_chord_length( &pts).unwrap();
    assert_eq!( &[0.0, 0.5, 1.0], curve.params());
    assert_eq!( 0.0, curve.length());
    assert_eq!( pts[0], curve.point(0.25));

    let t0 = Utc.with_ymd_and_hms( 2020, 1, 1, 0, 0, 0).unwrap();
    let timed = [(t0, p(0.0,0.0,0.0)), (t0, p(1.0,0.0,0.0)), (t0, p(2.0,0.0,0.0)), (t0, p(3.0,0.0,0.0))];
    let curve = Curve3::with_elapsed_time( &timed).unwrap();
    assert_eq!( 4, curve.params().len());
    assert_eq!( 0.0, curve.params()[0]);
    assert_eq!( 1.0, curve.params()[3]);
    assert!( (curve.point(0.5).x - 1.5).abs() < 1e-9);
}

#[test]
fn test_sequential_points() {
    let pts = [p(0.0,0.0,0.0), p(1.0,3.0,0.0), p(4.0,3.0,1.0), p(5.0,-1.0,2.0), p(9.0,0.0,2.0)];
    let curve = Curve3::with_chord_length( &pts).unwrap();
    let mut cursor = CurveCursor::new();

    for i in 0..=100 {
        let t = i as f64 / 100.0;
        assert_eq!( curve.point(t), curve.point_seq( t, &mut cursor));
    }
}

#[test]
fn test_tangent() {
    // points on a straight line have a constant tangent
    let pts = [p(0.0,0.0,0.0), p(1.0,2.0,2.0), p(2.0,4.0,4.0)];
    let curve = Curve3::with_chord_length( &pts).unwrap();
    let tan = curve.tangent(0.3);
    println!("tangent: {tan}");

    assert!( (tan.x - 2.0).abs() < 1e-9); // x goes from 0 to 2 over t ∈ [0,1]
    assert!( (tan.y - 4.0).abs() < 1e-9);
    assert!( (tan.z - 4.0).abs() < 1e-9);
    assert_eq!( Cartesian3::zero(), curve.tangent(1.5));
}

#[test]
fn test_too_few_points() {
    assert_eq!( OdinSplineError::InsufficientPoints(1), Curve3::with_chord_length( &[p(0.0,0.0,0.0)]).unwrap_err());
    assert_eq!( OdinSplineError::InsufficientPoints(0), Curve3::with_elapsed_time( &[]).unwrap_err());
}

#[test]
fn test_out_of_order_times() {
    let t0 = Utc.with_ymd_and_hms( 2020, 1, 1, 0, 0, 0).unwrap();
    let timed = [(t0, p(0.0,0.0,0.0)), (t0 + TimeDelta::seconds(60), p(1.0,0.0,0.0)), (t0 + TimeDelta::seconds(30), p(2.0,0.0,0.0)), (t0 + TimeDelta::seconds(90), p(3.0,0.0,0.0))];
    assert_eq!( OdinSplineError::NonMonotonic(2), Curve3::with_elapsed_time( &timed).unwrap_err());
}
