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

use std::{collections::HashMap, path::Path, time::Duration};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use odin_common::{
    Mean, is_none,
    datetime::{deserialize_duration, exceeds_duration, minutes, serialize_duration},
    fs::{filepath_contents, set_filepath_contents},
    geo::{degree_distance, great_circle_miles},
};
use odin_spline::Parameterization;

use crate::errors::Result;
use crate::msg::{SbsMessage, TransmissionKind};

/// a single observed position of an aircraft
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct LatLon {
    pub time: DateTime<Utc>,
    pub lat: f64,
    pub lon: f64,
    pub alt: f64, // [ft]
}

/// the keyframes of one flight segment of an aircraft. Keyframes are kept in the order in which they
/// were received. `start` and `end` are only reliable after [`finalize_tracks`]
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct PlaneTrack {
    pub hex_id: String,
    #[serde(skip_serializing_if = "is_none", default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "is_none", default)]
    pub end: Option<DateTime<Utc>>,
    pub keyframes: Vec<LatLon>,
}

impl PlaneTrack {
    pub fn new (hex_id: impl ToString)->Self {
        PlaneTrack { hex_id: hex_id.to_string(), start: None, end: None, keyframes: Vec::new() }
    }

    pub fn len (&self)->usize { self.keyframes.len() }

    pub fn is_empty (&self)->bool { self.keyframes.is_empty() }

    pub fn first_keyframe (&self)->Option<&LatLon> { self.keyframes.first() }

    pub fn last_keyframe (&self)->Option<&LatLon> { self.keyframes.last() }

    /// time between first and last keyframe
    pub fn duration (&self)->Option<chrono::TimeDelta> {
        match (self.keyframes.first(), self.keyframes.last()) {
            (Some(first), Some(last)) => Some( last.time - first.time),
            _ => None
        }
    }
}

/// cumulative great circle distance between consecutive keyframes in statute miles
pub fn flight_length (track: &PlaneTrack)->f64 {
    track.keyframes.windows(2)
        .map( |w| great_circle_miles( w[0].lat, w[0].lon, w[1].lat, w[1].lon))
        .sum()
}

/* #region config *********************************************************************************/

/// configuration for track reconstruction, normally loaded from a RON file such as
/// ```ron
/// TrackConfig(
///     source_tz: "America/Los_Angeles",
///     max_gap: "1h",
///     max_flight_length: Some(500.0),
/// )
/// ```
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// timezone in which the receiver reports message timestamps
    pub source_tz: Tz,

    /// a position update that is more than max_gap after the last keyframe starts a new track
    #[serde(serialize_with = "serialize_duration", deserialize_with = "deserialize_duration")]
    pub max_gap: Duration,

    /// optional distance [statute miles] between consecutive positions that starts a new track
    pub max_jump: Option<f64>,

    /// tracks with fewer keyframes are dropped (at least 2)
    pub min_keyframes: usize,

    /// optional maximum cumulative track length [statute miles]
    pub max_flight_length: Option<f64>,

    /// optional limit [degrees] for keyframe distance from the center of all keyframes
    pub max_center_offset: Option<f64>,

    pub parameterization: Parameterization,
}

impl Default for TrackConfig {
    fn default()->Self {
        TrackConfig {
            source_tz: Tz::UTC,
            max_gap: minutes(30),
            max_jump: None,
            min_keyframes: 2,
            max_flight_length: Some(500.0),
            max_center_offset: None,
            parameterization: Parameterization::ElapsedTime,
        }
    }
}

/* #endregion config */

/* #region consolidator ***************************************************************************/

/// accumulates keyframes per aircraft from a message stream and splits them into separate tracks
/// if consecutive positions are too far apart (in time or space).
///
/// Missing altitudes of position reports are filled in with the last altitude that was reported by
/// the same aircraft (in any transmission), or 0 if there was none yet
pub struct TrackConsolidator {
    config: TrackConfig,
    in_progress: HashMap<String,PlaneTrack>,
    last_altitude: HashMap<String,f64>,
    completed: Vec<PlaneTrack>,

    n_messages: usize,
    n_splits: usize,
}

impl TrackConsolidator {
    pub fn new (config: TrackConfig)->Self {
        TrackConsolidator {
            config,
            in_progress: HashMap::new(),
            last_altitude: HashMap::new(),
            completed: Vec::new(),
            n_messages: 0,
            n_splits: 0,
        }
    }

    pub fn config (&self)->&TrackConfig { &self.config }

    pub fn n_in_progress (&self)->usize { self.in_progress.len() }

    pub fn n_completed (&self)->usize { self.completed.len() }

    pub fn ingest (&mut self, msg: &SbsMessage) {
        let hex_id = msg.hex_id();
        if hex_id.is_empty() {
            debug!("ignoring message without hex id: {}", msg);
            return
        }
        self.n_messages += 1;

        if !self.in_progress.contains_key( hex_id) {
            self.in_progress.insert( hex_id.to_string(), PlaneTrack::new( hex_id));
        }

        let last_alt = self.last_altitude.get( hex_id).copied();
        if let SbsMessage::Transmission{data,..} = msg && let Some(alt) = data.altitude {
            self.last_altitude.insert( hex_id.to_string(), alt);
        }

        let Some(track) = self.in_progress.get_mut( hex_id) else { return };

        match msg {
            SbsMessage::NewAircraft{header} => {
                if header.generated_at.is_some() { track.start = header.generated_at }
            }
            SbsMessage::StatusChange{header,status} if status.is_terminal() => {
                if header.generated_at.is_some() { track.end = header.generated_at }
            }
            SbsMessage::Transmission{header,data} if header.transmission_kind() == Some(TransmissionKind::AirbornePosition) => {
                if let Some((time,lat,lon,alt)) = msg.airborne_position() {
                    if let Some(last) = track.keyframes.last() && is_new_segment( &self.config, last, &time, lat, lon) {
                        let segment = std::mem::replace( track, PlaneTrack::new( hex_id));
                        debug!("splitting track of {} after {} keyframes", hex_id, segment.len());
                        self.completed.push( segment);
                        self.n_splits += 1;
                    }

                    let alt = alt.or( last_alt).unwrap_or(0.0);
                    track.keyframes.push( LatLon{ time, lat, lon, alt });

                } else if data.position().is_some() {
                    debug!("ignoring position without timestamp: {}", msg);
                }
            }
            _ => {}
        }
    }

    /// flush all tracks that are still in progress and return all tracks in order of completion. Tracks
    /// that were still in progress are ordered by hex id
    pub fn finish (self)->Vec<PlaneTrack> {
        let TrackConsolidator { mut completed, in_progress, n_messages, n_splits, .. } = self;

        let mut remaining: Vec<PlaneTrack> = in_progress.into_values().collect();
        remaining.sort_by( |a,b| a.hex_id.cmp( &b.hex_id));
        completed.extend( remaining);

        info!("consolidated {} messages into {} tracks ({} splits)", n_messages, completed.len(), n_splits);
        completed
    }
}

fn is_new_segment (config: &TrackConfig, last: &LatLon, time: &DateTime<Utc>, lat: f64, lon: f64)->bool {
    if exceeds_duration( time, &last.time, &config.max_gap) {
        return true
    }

    if let Some(max_jump) = config.max_jump {
        great_circle_miles( last.lat, last.lon, lat, lon) > max_jump
    } else {
        false
    }
}

/// run a whole message sequence through a new consolidator
pub fn consolidate<'a> (msgs: impl IntoIterator<Item=&'a SbsMessage>, config: &TrackConfig)->Vec<PlaneTrack> {
    let mut consolidator = TrackConsolidator::new( config.clone());
    for msg in msgs {
        consolidator.ingest( msg);
    }
    consolidator.finish()
}

/* #endregion consolidator */

/* #region finalizer ******************************************************************************/

/// turn consolidated tracks into the exported track list:
///  - (optional) drop keyframes that are too far from the center of all keyframes. Culled keyframes are
///    removed from their tracks, i.e. they are neither exported nor used for the `min_keyframes` check
///  - drop tracks with less than `min_keyframes` keyframes
///  - set start/end from the first/last keyframe
///  - (optional) drop tracks that are longer than `max_flight_length`
///  - sort by start, hex id and end
pub fn finalize_tracks (mut tracks: Vec<PlaneTrack>, config: &TrackConfig)->Vec<PlaneTrack> {
    let n_input = tracks.len();

    if let Some(max_offset) = config.max_center_offset {
        cull_outliers( &mut tracks, max_offset);
    }

    let min_keyframes = config.min_keyframes.max(2);

    let mut result: Vec<PlaneTrack> = tracks.into_iter().filter_map( |mut track| {
        if track.keyframes.len() < min_keyframes {
            return None
        }

        track.start = track.keyframes.first().map( |kf| kf.time);
        track.end = track.keyframes.last().map( |kf| kf.time);

        if let Some(max_len) = config.max_flight_length {
            let len = flight_length( &track);
            if len > max_len {
                debug!("dropping track of {} with length {:.1}mi", track.hex_id, len);
                return None
            }
        }
        Some(track)
    }).collect();

    result.sort_by( |a,b| {
        a.start.cmp( &b.start)
            .then_with( || a.hex_id.cmp( &b.hex_id))
            .then_with( || a.end.cmp( &b.end))
    });

    info!("finalized {} out of {} tracks", result.len(), n_input);
    result
}

// receiver logs occasionally contain bogus positions that are far away from everything else.
// This removes them from the tracks, which can leave tracks empty
fn cull_outliers (tracks: &mut [PlaneTrack], max_offset: f64) {
    let lons: Mean = tracks.iter().flat_map( |t| t.keyframes.iter().map( |kf| kf.lon)).collect();
    let lats: Mean = tracks.iter().flat_map( |t| t.keyframes.iter().map( |kf| kf.lat)).collect();
    if lons.is_empty() { return }
    let center = (lons.avg(), lats.avg());

    let mut n_culled = 0;
    for track in tracks.iter_mut() {
        let n = track.keyframes.len();
        track.keyframes.retain( |kf| degree_distance( kf.lon, kf.lat, center.0, center.1) < max_offset);
        n_culled += n - track.keyframes.len();
    }

    if n_culled > 0 {
        debug!("culled {} keyframes further than {} deg from ({:.3},{:.3})", n_culled, max_offset, center.0, center.1);
    }
}

/* #endregion finalizer */

//--- JSON track list

pub fn tracks_to_json (tracks: &[PlaneTrack])->Result<String> {
    Ok( serde_json::to_string_pretty( tracks)? )
}

pub fn write_tracks_json (path: impl AsRef<Path>, tracks: &[PlaneTrack])->Result<()> {
    let json = tracks_to_json( tracks)?;
    set_filepath_contents( path, json.as_bytes())?;
    Ok(())
}

pub fn read_tracks_json (path: impl AsRef<Path>)->Result<Vec<PlaneTrack>> {
    let contents = filepath_contents( &path)?;
    Ok( serde_json::from_slice( &contents)? )
}
