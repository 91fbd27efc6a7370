//! Command-Line Argument Parsing Module
//!
//! Uses clap for type-safe argument parsing.

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

use clap::{Parser, ValueEnum};
use code_management_class_loading::ArchivePolicy;
use entities_surface::DisplayGeometry;
use usecases_program_loading::DispatchMode;

/// Archive policy as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Resolve and initialize every archive class while staging
    InitializeAll,
    /// Define archive classes; run initializers on first use
    DefineOnly,
}

impl From<PolicyArg> for ArchivePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::InitializeAll => ArchivePolicy::InitializeAll,
            PolicyArg::DefineOnly => ArchivePolicy::DefineOnly,
        }
    }
}

/// Program loader command-line arguments
#[derive(Parser, Debug)]
#[command(name = "progload")]
#[command(about = "Stage classes and archives, then hand control to an entry class")]
pub struct LoaderArgs {
    /// Fully-qualified name of the entry class
    pub entry: String,

    /// Class to resolve and initialize before the archives (repeatable)
    #[arg(long = "class", value_name = "NAME")]
    pub classes: Vec<String>,

    /// Archive path or file: URL to stage (repeatable)
    #[arg(long = "archive", value_name = "LOCATION")]
    pub archives: Vec<String>,

    /// Hand the placeholder window to `load(window)` instead of passing arguments
    #[arg(long)]
    pub window: bool,

    /// Show the handed-over window decorated
    #[arg(long, requires = "window")]
    pub decorated: bool,

    /// Primary display size, WIDTHxHEIGHT
    #[arg(long, value_name = "WxH")]
    pub display: Option<DisplayGeometry>,

    /// Whether staging initializes archive classes
    #[arg(long, value_enum)]
    pub archive_policy: Option<PolicyArg>,

    /// Arguments passed to `load([string])`
    #[arg(last = true)]
    pub args: Vec<String>,
}

impl LoaderArgs {
    pub fn dispatch_mode(&self) -> DispatchMode {
        if self.window {
            DispatchMode::Window
        } else {
            DispatchMode::Arguments
        }
    }
}
