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

//! reconstruction of aircraft tracks from BaseStation (SBS) logs as written by dump1090 and similar
//! ADS-B receivers. The pipeline is
//!
//!   text lines -> [`sbs::parse_line`] -> [`SbsMessage`] -> [`track::TrackConsolidator`]
//!     -> [`track::finalize_tracks`] -> JSON track list -> [`playback::TrackCurve`]

use std::path::Path;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use odin_common::fs::filepath_contents;

pub mod errors;
pub mod msg;
pub mod sbs;
pub mod codec;
pub mod track;
pub mod aircraft;
pub mod playback;

pub use errors::{OdinSbsError, Result};
pub use msg::{SbsMessage, MsgHeader, MessageType, TransmissionKind, AircraftStatus, TransmissionData};

/// load a RON config file
pub fn load_config<C> (path: impl AsRef<Path>)->Result<C> where C: for<'a> Deserialize<'a> {
    let path = path.as_ref();
    let data = filepath_contents( &path)?;
    ron::de::from_bytes( data.as_slice())
        .map_err( |e| OdinSbsError::ConfigError( format!("{}: {}", path.display(), e)))
}

/// parse a RON config from a string
pub fn parse_config<C> (s: &str)->Result<C> where C: for<'a> Deserialize<'a> {
    ron::from_str( s).map_err( |e| OdinSbsError::ConfigError( e.to_string()))
}

/// install a tracing subscriber that is configured through RUST_LOG. This only succeeds if there is
/// no global subscriber yet
pub fn init_tracing () {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())
        .try_init();
}
