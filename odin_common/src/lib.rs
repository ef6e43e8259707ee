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

pub mod datetime;
pub mod geo;
pub mod cartesian3;
pub mod fs;

// math shorthands for formula heavy code
#[inline(always)] pub fn sin (x: f64)->f64 { x.sin() }
#[inline(always)] pub fn cos (x: f64)->f64 { x.cos() }
#[inline(always)] pub fn acos (x: f64)->f64 { x.acos() }
#[inline(always)] pub fn sqrt (x: f64)->f64 { x.sqrt() }
#[inline(always)] pub fn pow2 (x: f64)->f64 { x*x }
#[inline(always)] pub fn rad (deg: f64)->f64 { deg.to_radians() }

// for #[serde(skip_serializing_if="odin_common::is_none")] on optional fields
#[inline] pub fn is_none<T> (opt: &Option<T>)->bool { opt.is_none() }

/// running mean of a sequence of observations
#[derive(Debug,Clone,Default)]
pub struct Mean {
    n: usize,
    sum: f64,
}

impl Mean {
    pub fn new()->Self { Mean { n: 0, sum: 0.0 } }

    pub fn add (&mut self, x: f64) {
        self.n += 1;
        self.sum += x;
    }

    /// NaN if there are no observations
    pub fn avg (&self)->f64 {
        if self.n > 0 { self.sum / self.n as f64 } else { f64::NAN }
    }

    pub fn is_empty (&self)->bool { self.n == 0 }
}

impl FromIterator<f64> for Mean {
    fn from_iter<I: IntoIterator<Item=f64>> (iter: I)->Self {
        let mut acc = Mean::new();
        for x in iter { acc.add(x) }
        acc
    }
}
