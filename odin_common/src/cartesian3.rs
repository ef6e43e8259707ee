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

use std::{fmt, ops::Sub};
use serde::{Serialize,Deserialize};

/// a plain 3D point. This has no units since it is also used for lon/lat/alt triples and for
/// positions that are remapped into abstract scene boxes
#[derive(Debug,Clone,Copy,Serialize,Deserialize,PartialEq)]
pub struct Cartesian3 {
    pub x: f64,
    pub y: f64,
    pub z: f64
}

impl Cartesian3 {
    #[inline] pub fn new (x: f64, y: f64, z: f64)->Self { Cartesian3 { x, y, z } }

    #[inline] pub fn zero ()->Self { Cartesian3::new( 0.0, 0.0, 0.0) }

    pub fn dot (&self, other: &Cartesian3)->f64 {
        self.x*other.x + self.y*other.y + self.z*other.z
    }

    pub fn length (&self)->f64 { self.dot( self).sqrt() }

    pub fn distance_to (&self, other: &Cartesian3)->f64 {
        (other - self).length()
    }

    pub fn component_min (&self, other: &Cartesian3)->Self {
        Cartesian3::new( self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    pub fn component_max (&self, other: &Cartesian3)->Self {
        Cartesian3::new( self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// map self from box [from_min,from_max] into [to_min,to_max], per axis.
    /// Axes without extent (from_min == from_max) map to the respective `to_min` component
    pub fn remap (&self, from_min: &Cartesian3, from_max: &Cartesian3, to_min: &Cartesian3, to_max: &Cartesian3)->Self {
        #[inline]
        fn remap1 (v: f64, f0: f64, f1: f64, t0: f64, t1: f64)->f64 {
            let df = f1 - f0;
            if df == 0.0 { t0 } else { (v - f0) / df * (t1 - t0) + t0 }
        }

        Cartesian3::new(
            remap1( self.x, from_min.x, from_max.x, to_min.x, to_max.x),
            remap1( self.y, from_min.y, from_max.y, to_min.y, to_max.y),
            remap1( self.z, from_min.z, from_max.z, to_min.z, to_max.z),
        )
    }
}

impl fmt::Display for Cartesian3 {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!( f, "({:.6}, {:.6}, {:.6})", self.x, self.y, self.z)
    }
}

//--- arithmetic

impl Sub for Cartesian3 {
    type Output = Cartesian3;
    fn sub (self, o: Cartesian3)->Cartesian3 { Cartesian3::new( self.x - o.x, self.y - o.y, self.z - o.z) }
}

impl Sub for &Cartesian3 {
    type Output = Cartesian3;
    fn sub (self, o: &Cartesian3)->Cartesian3 { *self - *o }
}

