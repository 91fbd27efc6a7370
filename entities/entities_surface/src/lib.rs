//! Entities Layer: Surface
//!
//! Provides the placeholder window shown while a program is staged:
//! - Window handle with shared, observable state
//! - Display geometry and centering
//!
//! Rendering is left to whatever presentation layer observes a [`Window`];
//! this crate only tracks the state the loader is contractually bound to
//! (visible, decorated, disposed).

/*
 * %CopyrightBegin%
 *
 * SPDX-License-Identifier: Apache-2.0
 *
 * Copyright Lee Barney 2025. All Rights Reserved.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 * %CopyrightEnd%
 */

pub mod geometry;
pub mod window;

pub use geometry::{DisplayGeometry, GeometryParseError, Point, Size};
pub use window::{SurfaceError, Window};
