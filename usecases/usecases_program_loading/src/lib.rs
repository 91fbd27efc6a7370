//! Use Cases Layer: Program Loading
//!
//! Provides the program loader:
//! - Load plan: entry class, extra classes and archives
//! - Staging of extra classes and archive contents into the class registry
//! - Entry-point dispatch with a string argument list or the placeholder
//!   window
//! - Typed loader errors classified by kind
//!
//! Depends on the Entities, Infrastructure and Code Management layers.

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

pub mod config;
pub mod entry_point;
pub mod error;
pub mod loader;
pub mod plan;

pub use config::{LoaderConfig, SplashConfig};
pub use entry_point::{ArgsEntryPoint, DispatchMode, EntryPoint, WindowEntryPoint, ENTRY_METHOD};
pub use error::{ClassRole, ConfigurationError, ContractViolation, ErrorKind, LoaderError};
pub use loader::{DispatchOutcome, ProgramLoader, StagingReport};
pub use plan::LoadPlan;
