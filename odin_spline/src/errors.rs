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

pub type Result<T> = std::result::Result<T,OdinSplineError>;

#[derive(Error,Debug,Clone,PartialEq)]
pub enum OdinSplineError {

    #[error("spline requires at least two points, got {0}")]
    InsufficientPoints(usize),

    #[error("number of parameters ({params}) does not match number of values ({values})")]
    LengthMismatch { params: usize, values: usize },

    #[error("parameters not finite and non-decreasing at index {0}")]
    NonMonotonic(usize),
}
