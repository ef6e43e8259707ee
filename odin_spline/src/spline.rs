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

use crate::errors::{OdinSplineError, Result};

/// width that replaces zero width segments (duplicate parameter values) when computing coefficients.
/// Segments with a positive width keep it, no matter how small. Knot values of duplicates are still
/// returned exactly (the last duplicate wins), but the curve close to such a knot can overshoot if the
/// duplicates have different values
pub const MIN_SEGMENT_WIDTH: f64 = 1e-6;

/// a natural cubic spline through a set of (parameter,value) samples with non-decreasing parameters.
///
/// Each segment `i` covers `[params[i],params[i+1])` and is evaluated as
/// `a[i] + b[i]·dx + c[i]·dx² + d[i]·dx³` with `dx = x - params[i]`.
/// Queries outside of the parameter range are clamped to the respective boundary value, i.e. we do
/// not extrapolate.
///
/// Splines are immutable once fitted. Sequential evaluation state is kept in a caller owned [`SplineCursor`],
/// which means a Spline can be shared between threads
#[derive(Debug,Clone)]
pub struct Spline {
    params: Vec<f64>,
    values: Vec<f64>,

    // per segment coefficients (n-1 entries each)
    a: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
    d: Vec<f64>,
}

/// cache for the last resolved segment, used to speed up evaluation of monotonically increasing queries.
/// Since it only stores a segment index it can be shared between splines that have the same parameters
/// (e.g. the coordinate splines of a parametric curve)
#[derive(Debug,Clone,Copy,Default)]
pub struct SplineCursor {
    segment: Option<usize>
}

impl SplineCursor {
    pub fn new()->Self { SplineCursor { segment: None } }

    pub fn reset (&mut self) { self.segment = None }

    pub fn segment (&self)->Option<usize> { self.segment }
}

/// where a query parameter falls relative to the spline parameters
#[derive(Debug,Clone,Copy,PartialEq)]
enum Location {
    Below,
    Knot(usize),
    Segment(usize),
    Above
}

impl Spline {

    pub fn fit (params: &[f64], values: &[f64])->Result<Spline> {
        if params.len() != values.len() {
            return Err( OdinSplineError::LengthMismatch{ params: params.len(), values: values.len() })
        }

        let n = params.len();
        if n < 2 {
            return Err( OdinSplineError::InsufficientPoints(n))
        }

        for i in 0..n {
            if !params[i].is_finite() || (i > 0 && params[i] < params[i-1]) {
                return Err( OdinSplineError::NonMonotonic(i))
            }
        }

        let h: Vec<f64> = params.windows(2).map( |w| segment_width( w[0], w[1])).collect();

        let (a,b,c,d) = if n == 2 {
            linear_coefficients( values, &h)
        } else {
            natural_cubic_coefficients( values, &h)
        };

        Ok( Spline { params: params.to_vec(), values: values.to_vec(), a, b, c, d } )
    }

    #[inline] pub fn len (&self)->usize { self.params.len() }

    #[inline] pub fn n_segments (&self)->usize { self.params.len() - 1 }

    #[inline] pub fn params (&self)->&[f64] { self.params.as_slice() }

    #[inline] pub fn values (&self)->&[f64] { self.values.as_slice() }

    /// first and last parameter
    pub fn domain (&self)->(f64,f64) {
        (self.params[0], self.params[self.params.len()-1])
    }

    /// `[a,b,c,d]` coefficients of segment i
    pub fn coefficients (&self, i: usize)->Option<[f64;4]> {
        if i < self.a.len() {
            Some( [self.a[i], self.b[i], self.c[i], self.d[i]] )
        } else {
            None
        }
    }

    /// interpolated value at x. Exact for sample parameters, clamped to first/last value outside the domain
    pub fn value (&self, x: f64)->f64 {
        if x.is_nan() { return f64::NAN }
        self.value_at( self.locate(x), x)
    }

    /// same result as [`Spline::value`] but optimized for monotonically increasing x sequences by first
    /// checking if x is still within the segment stored in the cursor
    pub fn value_seq (&self, x: f64, cursor: &mut SplineCursor)->f64 {
        if x.is_nan() { return f64::NAN }

        if let Some(i) = cursor.segment && self.is_in_segment( i, x) {
            return self.value_at( Location::Segment(i), x)
        }

        let loc = self.locate(x);
        match loc {
            Location::Segment(i) | Location::Knot(i) if i < self.n_segments() => cursor.segment = Some(i),
            _ => cursor.segment = None
        }
        self.value_at( loc, x)
    }

    /// first derivative at x. Knots use the segment that starts at the knot (the last segment for the last knot).
    /// Outside of the domain the (clamped) spline is constant, hence we return 0
    pub fn derivative (&self, x: f64)->f64 {
        if x.is_nan() { return f64::NAN }

        match self.locate(x) {
            Location::Below | Location::Above => 0.0,
            Location::Knot(i) => self.segment_derivative( i.min( self.n_segments()-1), x),
            Location::Segment(i) => self.segment_derivative( i, x)
        }
    }

    fn is_in_segment (&self, i: usize, x: f64)->bool {
        i + 1 < self.params.len() && self.params[i] <= x && x < self.params[i+1]
    }

    fn locate (&self, x: f64)->Location {
        let n = self.params.len();
        let k = self.params.partition_point( |p| *p <= x); // number of params <= x

        if k == 0 {
            Location::Below
        } else if self.params[k-1] == x {
            Location::Knot(k-1)
        } else if k == n {
            Location::Above
        } else {
            Location::Segment(k-1)
        }
    }

    fn value_at (&self, loc: Location, x: f64)->f64 {
        match loc {
            Location::Below => self.values[0],
            Location::Above => self.values[ self.values.len()-1],
            Location::Knot(i) => self.values[i],
            Location::Segment(i) => {
                if self.params[i] == x {
                    self.values[i]
                } else {
                    let dx = x - self.params[i];
                    self.a[i] + dx*(self.b[i] + dx*(self.c[i] + dx*self.d[i]))
                }
            }
        }
    }

    fn segment_derivative (&self, i: usize, x: f64)->f64 {
        let dx = x - self.params[i];
        self.b[i] + dx*(2.0*self.c[i] + dx*3.0*self.d[i])
    }
}

#[inline]
fn segment_width (p0: f64, p1: f64)->f64 {
    let h = p1 - p0;
    if h > 0.0 { h } else { MIN_SEGMENT_WIDTH }
}

type Coefficients = (Vec<f64>,Vec<f64>,Vec<f64>,Vec<f64>);

/// the two point case degenerates into linear interpolation (no system to solve)
fn linear_coefficients (y: &[f64], h: &[f64])->Coefficients {
    ( vec![y[0]], vec![(y[1] - y[0]) / h[0]], vec![0.0], vec![0.0] )
}

/// compute natural cubic spline coefficients for n > 2 samples.
/// The interior quadratic coefficients c[1..n-1] are the solution of a strictly diagonal dominant
/// tridiagonal system, which we solve with the Thomas algorithm in O(n). Natural boundary conditions
/// mean c[0] = c[n-1] = 0
fn natural_cubic_coefficients (y: &[f64], h: &[f64])->Coefficients {
    let n = y.len();
    let m = n - 2; // number of unknowns

    // forward elimination
    let mut cp = vec![0.0; m]; // modified super diagonal
    let mut dp = vec![0.0; m]; // modified rhs

    for k in 0..m {
        let i = k + 1;
        let sub = if k > 0 { h[i-1] } else { 0.0 };
        let sup = if k < m-1 { h[i] } else { 0.0 };
        let diag = 2.0 * (h[i-1] + h[i]);
        let rhs = 3.0 * ((y[i+1] - y[i]) / h[i] - (y[i] - y[i-1]) / h[i-1]);

        let (cp_prev, dp_prev) = if k > 0 { (cp[k-1], dp[k-1]) } else { (0.0, 0.0) };
        let denom = diag - sub * cp_prev;

        cp[k] = sup / denom;
        dp[k] = (rhs - sub * dp_prev) / denom;
    }

    // back substitution
    let mut c = vec![0.0; n];
    c[m] = dp[m-1];
    for k in (0..m-1).rev() {
        c[k+1] = dp[k] - cp[k] * c[k+2];
    }

    let n_seg = n - 1;
    let mut a = Vec::with_capacity(n_seg);
    let mut b = Vec::with_capacity(n_seg);
    let mut d = Vec::with_capacity(n_seg);

    for i in 0..n_seg {
        a.push( y[i]);
        b.push( (y[i+1] - y[i]) / h[i] - h[i] * (2.0*c[i] + c[i+1]) / 3.0);
        d.push( (c[i+1] - c[i]) / (3.0 * h[i]));
    }
    c.truncate(n_seg);

    (a, b, c, d)
}
