//! Environment Configuration Module
//!
//! Reads `PROGLOAD_DISPLAY` (`WIDTHxHEIGHT`) and `PROGLOAD_ARCHIVE_POLICY`
//! (`initialize-all` or `define-only`). Unset or empty variables leave the
//! defaults in place.

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

use std::env;

use code_management_class_loading::ArchivePolicy;
use entities_surface::{DisplayGeometry, GeometryParseError};
use thiserror::Error;

pub const DISPLAY_VAR: &str = "PROGLOAD_DISPLAY";
pub const ARCHIVE_POLICY_VAR: &str = "PROGLOAD_ARCHIVE_POLICY";

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("PROGLOAD_DISPLAY is not a display size")]
    Display(#[source] GeometryParseError),

    #[error("PROGLOAD_ARCHIVE_POLICY: unknown archive policy `{0}` (expected initialize-all or define-only)")]
    ArchivePolicy(String),
}

/// Settings taken from the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub display: Option<DisplayGeometry>,
    pub archive_policy: Option<ArchivePolicy>,
}

impl EnvConfig {
    /// Read the process environment
    pub fn from_env() -> Result<Self, EnvError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read settings through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EnvError> {
        let value = |name: &str| lookup(name).filter(|v: &String| !v.trim().is_empty());

        let display = value(DISPLAY_VAR)
            .map(|v| v.parse::<DisplayGeometry>())
            .transpose()
            .map_err(EnvError::Display)?;
        let archive_policy = value(ARCHIVE_POLICY_VAR)
            .map(|v| parse_policy(&v))
            .transpose()?;

        Ok(Self {
            display,
            archive_policy,
        })
    }
}

fn parse_policy(value: &str) -> Result<ArchivePolicy, EnvError> {
    match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
        "initialize-all" => Ok(ArchivePolicy::InitializeAll),
        "define-only" => Ok(ArchivePolicy::DefineOnly),
        _ => Err(EnvError::ArchivePolicy(value.to_string())),
    }
}
