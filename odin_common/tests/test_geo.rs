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

use uom::si::length::{kilometer, meter, mile};
use odin_common::geo::*;

// run with "cargo test --test test_geo -- --nocapture"

#[test]
fn test_great_circle() {
    // one degree of longitude at the equator
    let d = great_circle_miles( 0.0, 0.0, 0.0, 1.0);
    println!("1deg at equator: {d}mi");
    assert!( (d - 69.09).abs() < 0.01);

    // acos would produce NaN for identical points without clamping
    let d = great_circle_distance( 37.17274, -122.03935, 37.17274, -122.03935);
    assert!( d.get::<meter>() < 1.0);
}

#[test]
fn test_long_distance() {
    // SFO -> LAX
    let d = great_circle_distance( 37.6188, -122.3750, 33.9425, -118.4081);
    println!("SFO-LAX: {}km", d.get::<kilometer>());
    assert!( d.get::<kilometer>() > 530.0 && d.get::<kilometer>() < 560.0);
}

#[test]
fn test_degree_distance() {
    assert_eq!( 5.0, degree_distance( 0.0, 0.0, 3.0, 4.0));
    assert_eq!( 5.0, degree_distance( -80.0, 40.0, -83.0, 36.0));
}
