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

//! smooth per-track trajectories for time based playback. Keyframes are mapped from (lon,lat,alt)
//! into a target box that is shared by all tracks of a scene, then fitted with a parametric curve

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use odin_common::{cartesian3::Cartesian3, datetime::elapsed_fraction};
use odin_spline::{Curve3, CurveCursor, Parameterization};

use crate::errors::Result;
use crate::track::{LatLon, PlaneTrack};

/// keyframe as (x: lon, y: lat, z: alt) point
#[inline]
pub fn geo_point (kf: &LatLon)->Cartesian3 {
    Cartesian3::new( kf.lon, kf.lat, kf.alt)
}

/// geographic and temporal extent of a set of tracks
#[derive(Debug,Clone,PartialEq)]
pub struct SceneBounds {
    pub min: Cartesian3, // (lon,lat,alt)
    pub max: Cartesian3,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl SceneBounds {
    /// None if there are no keyframes
    pub fn from_tracks (tracks: &[PlaneTrack])->Option<SceneBounds> {
        let mut keyframes = tracks.iter().flat_map( |t| t.keyframes.iter());
        let first = keyframes.next()?;

        let p = geo_point( first);
        let mut bounds = SceneBounds { min: p, max: p, start: first.time, end: first.time };

        for kf in keyframes {
            let p = geo_point( kf);
            bounds.min = bounds.min.component_min( &p);
            bounds.max = bounds.max.component_max( &p);
            if kf.time < bounds.start { bounds.start = kf.time }
            if kf.time > bounds.end { bounds.end = kf.time }
        }
        Some(bounds)
    }

    /// map keyframe into [0,target] (per axis). Axes without extent map to 0
    pub fn remap (&self, kf: &LatLon, target: &Cartesian3)->Cartesian3 {
        geo_point( kf).remap( &self.min, &self.max, &Cartesian3::zero(), target)
    }

    /// elapsed fraction of the scene time span
    pub fn time_fraction (&self, date: &DateTime<Utc>)->f64 {
        elapsed_fraction( date, &self.start, &self.end)
    }
}

/// the fitted trajectory of one track
#[derive(Debug,Clone)]
pub struct TrackCurve {
    pub hex_id: String,
    times: Vec<DateTime<Utc>>,
    curve: Curve3,
    parameterization: Parameterization,
}

impl TrackCurve {
    pub fn fit (track: &PlaneTrack, bounds: &SceneBounds, target: &Cartesian3, parameterization: Parameterization)->Result<TrackCurve> {
        let points: Vec<(DateTime<Utc>,Cartesian3)> = track.keyframes.iter().map( |kf| (kf.time, bounds.remap( kf, target))).collect();
        let curve = Curve3::fit( &points, parameterization)?;
        let times = points.iter().map( |(t,_)| *t).collect();

        Ok( TrackCurve { hex_id: track.hex_id.clone(), times, curve, parameterization } )
    }

    pub fn curve (&self)->&Curve3 { &self.curve }

    pub fn start (&self)->DateTime<Utc> { self.times[0] }

    pub fn end (&self)->DateTime<Utc> { self.times[ self.times.len()-1] }

    pub fn is_active (&self, date: &DateTime<Utc>)->bool {
        *date >= self.start() && *date <= self.end()
    }

    /// curve parameter for a given time. Keyframe times map to the parameters of their keyframes
    pub fn param_at (&self, date: &DateTime<Utc>)->f64 {
        let start = self.start();
        let end = self.end();

        match self.parameterization {
            Parameterization::ElapsedTime => {
                if end > start { elapsed_fraction( date, &start, &end).clamp( 0.0, 1.0) } else { 0.0 }
            }
            Parameterization::ChordLength => {
                // interpolate linearly between the parameters of the enclosing keyframes
                let params = self.curve.params();
                let k = self.times.partition_point( |t| t <= date);
                if k == 0 {
                    0.0
                } else if k == self.times.len() {
                    1.0
                } else {
                    let i = k - 1;
                    let f = elapsed_fraction( date, &self.times[i], &self.times[k]);
                    params[i] + f * (params[k] - params[i])
                }
            }
        }
    }

    /// position at a given time, clamped to the first/last keyframe outside of the track time span
    pub fn position_at (&self, date: &DateTime<Utc>)->Cartesian3 {
        self.curve.point( self.param_at( date))
    }

    /// n_frames evenly spaced positions along the curve
    pub fn sample (&self, n_frames: usize)->Vec<Cartesian3> {
        let mut cursor = CurveCursor::new();
        let d = if n_frames > 1 { (n_frames - 1) as f64 } else { 1.0 };
        (0..n_frames).map( |i| self.curve.point_seq( i as f64 / d, &mut cursor)).collect()
    }
}

/// fit curves for all tracks within a common target box. Tracks that cannot be fitted are skipped
pub fn fit_track_curves (tracks: &[PlaneTrack], target: &Cartesian3, parameterization: Parameterization)->Vec<TrackCurve> {
    let Some(bounds) = SceneBounds::from_tracks( tracks) else { return Vec::new() };

    let curves: Vec<TrackCurve> = tracks.iter().filter_map( |track| {
        match TrackCurve::fit( track, &bounds, target, parameterization) {
            Ok(tc) => Some(tc),
            Err(e) => {
                warn!("skipping track of {}: {}", track.hex_id, e);
                None
            }
        }
    }).collect();

    info!("fitted {} out of {} track curves", curves.len(), tracks.len());
    curves
}
