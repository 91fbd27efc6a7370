//! Archive Errors

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

use std::io;

use thiserror::Error;

/// Archive access errors
///
/// Every variant names the archive location so callers can report which
/// archive failed.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The location cannot name an archive (unsupported URL scheme, bad URL)
    #[error("unsupported archive location `{location}`: {reason}")]
    InvalidLocation { location: String, reason: String },

    /// Nothing exists at the location
    #[error("archive not found: {location}")]
    NotFound { location: String },

    /// The archive exists but could not be read
    #[error("cannot read archive {location}")]
    Unreadable {
        location: String,
        #[source]
        source: io::Error,
    },

    /// The file is not a readable zip container
    #[error("malformed archive {location}: {reason}")]
    Malformed { location: String, reason: String },

    /// One entry of an otherwise readable archive is damaged
    #[error("malformed entry `{entry}` in archive {location}: {reason}")]
    MalformedEntry {
        location: String,
        entry: String,
        reason: String,
    },
}

impl ArchiveError {
    /// Location of the archive this error is about
    pub fn location(&self) -> &str {
        match self {
            ArchiveError::InvalidLocation { location, .. }
            | ArchiveError::NotFound { location }
            | ArchiveError::Unreadable { location, .. }
            | ArchiveError::Malformed { location, .. }
            | ArchiveError::MalformedEntry { location, .. } => location,
        }
    }
}
