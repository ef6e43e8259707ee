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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use odin_common::{cartesian3::Cartesian3, datetime::elapsed_fraction};

use crate::errors::{OdinSplineError, Result};
use crate::spline::{Spline, SplineCursor};

/// how the normalized [0,1] curve parameter is derived from the input points
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize,Default)]
pub enum Parameterization {
    /// cumulative straight line distance between consecutive points
    ChordLength,
    /// elapsed fraction of the total time span of the points
    #[default]
    ElapsedTime,
}

/// evaluation cursor for monotonically increasing curve parameters.
/// All coordinate splines share the same parameters, hence a single segment cache suffices
pub type CurveCursor = SplineCursor;

/// a 3D parametric curve made of three natural cubic splines over a shared parameter in [0,1].
/// The first point is always at t=0.0 and the last point at t=1.0
#[derive(Debug,Clone)]
pub struct Curve3 {
    x: Spline,
    y: Spline,
    z: Spline,
    length: f64, // total chord length
}

impl Curve3 {

    /// parameterize by normalized cumulative chord length
    pub fn with_chord_length (points: &[Cartesian3])->Result<Curve3> {
        check_n_points( points.len())?;

        let mut acc: Vec<f64> = Vec::with_capacity( points.len());
        let mut total = 0.0;
        acc.push( 0.0);
        for w in points.windows(2) {
            total += w[0].distance_to( &w[1]);
            acc.push( total);
        }

        let params = normalized( acc, total);
        Self::from_params( &params, points, total)
    }

    /// parameterize by elapsed fraction of the total time span. Points have to be in chronological order
    pub fn with_elapsed_time (timed_points: &[(DateTime<Utc>,Cartesian3)])->Result<Curve3> {
        let n = timed_points.len();
        check_n_points( n)?;

        let points: Vec<Cartesian3> = timed_points.iter().map( |(_,p)| *p).collect();
        let total = chord_length( &points);

        let start = &timed_points[0].0;
        let end = &timed_points[n-1].0;

        let params = if end > start {
            let mut params: Vec<f64> = timed_points.iter().map( |(t,_)| elapsed_fraction( t, start, end)).collect();
            params[0] = 0.0;
            params[n-1] = 1.0;
            params
        } else {
            uniform_params(n)
        };

        Self::from_params( &params, &points, total)
    }

    pub fn fit (timed_points: &[(DateTime<Utc>,Cartesian3)], parameterization: Parameterization)->Result<Curve3> {
        match parameterization {
            Parameterization::ElapsedTime => Self::with_elapsed_time( timed_points),
            Parameterization::ChordLength => {
                let points: Vec<Cartesian3> = timed_points.iter().map( |(_,p)| *p).collect();
                Self::with_chord_length( &points)
            }
        }
    }

    fn from_params (params: &[f64], points: &[Cartesian3], length: f64)->Result<Curve3> {
        let xs: Vec<f64> = points.iter().map( |p| p.x).collect();
        let ys: Vec<f64> = points.iter().map( |p| p.y).collect();
        let zs: Vec<f64> = points.iter().map( |p| p.z).collect();

        Ok( Curve3 {
            x: Spline::fit( params, &xs)?,
            y: Spline::fit( params, &ys)?,
            z: Spline::fit( params, &zs)?,
            length
        })
    }

    pub fn point (&self, t: f64)->Cartesian3 {
        Cartesian3::new( self.x.value(t), self.y.value(t), self.z.value(t))
    }

    /// sequential version of [`Curve3::point`] for monotonically increasing t
    pub fn point_seq (&self, t: f64, cursor: &mut CurveCursor)->Cartesian3 {
        // the coordinate splines share parameters so they all resolve to the same segment
        let x = self.x.value_seq( t, cursor);
        let y = self.y.value_seq( t, cursor);
        let z = self.z.value_seq( t, cursor);
        Cartesian3::new( x, y, z)
    }

    /// first derivative with respect to t (not normalized)
    pub fn tangent (&self, t: f64)->Cartesian3 {
        Cartesian3::new( self.x.derivative(t), self.y.derivative(t), self.z.derivative(t))
    }

    pub fn params (&self)->&[f64] { self.x.params() }

    pub fn n_points (&self)->usize { self.x.len() }

    /// total chord length of the input points (not the arc length of the spline)
    pub fn length (&self)->f64 { self.length }

    /// the input point with index i
    pub fn control_point (&self, i: usize)->Option<Cartesian3> {
        if i < self.n_points() {
            Some( Cartesian3::new( self.x.values()[i], self.y.values()[i], self.z.values()[i]))
        } else {
            None
        }
    }
}

fn check_n_points (n: usize)->Result<()> {
    if n < 2 { Err( OdinSplineError::InsufficientPoints(n)) } else { Ok(()) }
}

fn chord_length (points: &[Cartesian3])->f64 {
    points.windows(2).map( |w| w[0].distance_to( &w[1])).sum()
}

/// normalize cumulative values by total. Degenerate totals fall back to uniform spacing
fn normalized (mut acc: Vec<f64>, total: f64)->Vec<f64> {
    let n = acc.len();
    if total > 0.0 && total.is_finite() {
        for v in acc.iter_mut() { *v /= total }
        acc[0] = 0.0;
        acc[n-1] = 1.0;
        acc
    } else {
        uniform_params(n)
    }
}

fn uniform_params (n: usize)->Vec<f64> {
    let d = (n - 1) as f64;
    (0..n).map( |i| if i == n-1 { 1.0 } else { i as f64 / d }).collect()
}
