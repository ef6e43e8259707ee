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

/// spherical earth distance functions for lat/lon positions given in degrees

use uom::si::f64::Length;
use uom::si::length::{meter,mile};
use crate::{sin,cos,acos,sqrt,pow2,rad};

/// mean earth radius in meters
pub const MEAN_EARTH_RADIUS: f64 = 6371000.0;

/// great circle distance based on the spherical law of cosines.
/// This is numerically poor for very short distances, which is why we clamp the cosine before
/// taking the acos (identical points would otherwise produce a NaN)
pub fn great_circle_distance (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->Length {
    let phi1 = rad(lat1);
    let phi2 = rad(lat2);
    let dlambda = rad(lon1 - lon2);

    let cos_d = sin(phi1)*sin(phi2) + cos(phi1)*cos(phi2)*cos(dlambda);
    let d = acos( cos_d.clamp(-1.0, 1.0));

    Length::new::<meter>( d * MEAN_EARTH_RADIUS)
}

/// convenience function for callers that keep distances as plain statute miles
#[inline]
pub fn great_circle_miles (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    great_circle_distance( lat1, lon1, lat2, lon2).get::<mile>()
}

/// planar distance in degree space. Only useful for coarse outlier detection
#[inline]
pub fn degree_distance (lon1: f64, lat1: f64, lon2: f64, lat2: f64)->f64 {
    sqrt( pow2(lon2 - lon1) + pow2(lat2 - lat1))
}
