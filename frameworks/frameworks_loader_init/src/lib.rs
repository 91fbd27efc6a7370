//! Frameworks Layer: Loader Initialization
//!
//! Bootstrap for the `progload` binary.
//!
//! ## Modules
//!
//! - **[`args`]**: command-line parsing with clap
//! - **[`env`]**: `PROGLOAD_*` environment configuration
//! - **[`logging`]**: tracing subscriber set-up
//! - **[`tools`]**: builtin tool classes and the natives archive classes
//!   can bind to
//! - **[`bootstrap`]**: builds the loader configuration and runs the
//!   program loader
//!
//! ## Initialization Sequence
//!
//! 1. Parse the command line
//! 2. Install the tracing subscriber
//! 3. Read the environment and merge it with the command line
//! 4. Register the builtin tools with the global class runtime
//! 5. Queue extra classes and archives, then dispatch

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

pub mod args;
pub mod bootstrap;
pub mod env;
pub mod logging;
pub mod tools;

pub use args::{LoaderArgs, PolicyArg};
pub use bootstrap::{loader_config, run, run_with_runtime, BootstrapError};
pub use env::{EnvConfig, EnvError, ARCHIVE_POLICY_VAR, DISPLAY_VAR};
pub use logging::init_logging;
pub use tools::{register_builtin_tools, ECHO_CLASS};
