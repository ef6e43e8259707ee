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

use thiserror::Error;
use odin_spline::OdinSplineError;

pub type Result<T> = std::result::Result<T,OdinSbsError>;

#[derive(Error,Debug)]
pub enum OdinSbsError {

    #[error("truncated message with {0} fields")]
    Truncated(usize),

    #[error("unknown message type {0}")]
    UnknownMessageType(String),

    #[error("invariant violation {0}")]
    InvariantViolation(String),

    #[error("unknown status code {0}")]
    UnknownStatusCode(String),

    #[error("invalid transmission type {0}")]
    InvalidTransmissionType(String),

    #[error("binary format error {0}")]
    BinaryFormat(String),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("config error {0}")]
    ConfigError(String),

    #[error("spline error {0}")]
    SplineError( #[from] OdinSplineError),
}

impl OdinSbsError {
    /// short category name used for parse statistics and log output
    pub fn category (&self)->&'static str {
        match self {
            OdinSbsError::Truncated(_) => "truncated",
            OdinSbsError::UnknownMessageType(_) => "unknown_type",
            OdinSbsError::InvariantViolation(_) => "invariant",
            OdinSbsError::UnknownStatusCode(_) => "status_code",
            OdinSbsError::InvalidTransmissionType(_) => "transmission_type",
            OdinSbsError::BinaryFormat(_) => "binary_format",
            OdinSbsError::IOError(_) => "io",
            OdinSbsError::JsonError(_) => "json",
            OdinSbsError::ConfigError(_) => "config",
            OdinSbsError::SplineError(_) => "spline",
        }
    }
}

macro_rules! binary_format_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        OdinSbsError::BinaryFormat( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use binary_format_error;
