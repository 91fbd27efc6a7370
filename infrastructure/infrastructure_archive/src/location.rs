//! Archive Locations
//!
//! An archive is named either by a filesystem path or by a `file:` URL.

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

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use crate::error::ArchiveError;

/// Where an archive lives
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchiveLocation {
    path: PathBuf,
    display: String,
}

impl ArchiveLocation {
    /// Parse a filesystem path or a `file:` URL
    ///
    /// Single-letter schemes are treated as Windows drive prefixes, so
    /// `C:\libs\app.jar` is a path rather than a URL.
    pub fn parse(location: &str) -> Result<Self, ArchiveError> {
        match Url::parse(location) {
            Ok(url) if url.scheme().len() > 1 => Self::from_url(&url),
            _ => Ok(Self::from_path(location)),
        }
    }

    /// Resolve a URL; only the `file` scheme names a local archive
    pub fn from_url(url: &Url) -> Result<Self, ArchiveError> {
        if url.scheme() != "file" {
            return Err(ArchiveError::InvalidLocation {
                location: url.to_string(),
                reason: format!("scheme `{}` is not supported", url.scheme()),
            });
        }
        let path = url
            .to_file_path()
            .map_err(|()| ArchiveError::InvalidLocation {
                location: url.to_string(),
                reason: "URL does not name a local file".to_string(),
            })?;
        Ok(Self {
            path,
            display: url.to_string(),
        })
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = path.display().to_string();
        Self { path, display }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for ArchiveLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl From<PathBuf> for ArchiveLocation {
    fn from(path: PathBuf) -> Self {
        Self::from_path(path)
    }
}

impl From<&Path> for ArchiveLocation {
    fn from(path: &Path) -> Self {
        Self::from_path(path)
    }
}
