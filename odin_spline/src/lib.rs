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

//! natural cubic splines and 3D parametric curves built from them. These are used to turn irregularly
//! spaced position samples into smooth trajectories that can be evaluated at arbitrary parameters

pub mod errors;
pub mod spline;
pub mod curve;

pub use errors::{OdinSplineError, Result};
pub use spline::{Spline, SplineCursor, MIN_SEGMENT_WIDTH};
pub use curve::{Curve3, CurveCursor, Parameterization};
