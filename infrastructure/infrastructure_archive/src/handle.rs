//! Archive Handles
//!
//! [`ArchiveHandle`] is an opened, validated archive. It is checked when it
//! is created, so a missing or corrupt archive is reported at registration
//! rather than when its classes are needed. Reading a handle consumes it
//! and yields an [`OpenArchive`] whose class entries can be enumerated in
//! archive order and decompressed one at a time.

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
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};

use entities_class_model::QualifiedName;
use flate2::read::DeflateDecoder;
use tracing::debug;

use crate::error::ArchiveError;
use crate::location::ArchiveLocation;

/// Opened and validated archive
///
/// Owns the underlying file until [`read`](Self::read) consumes it.
pub struct ArchiveHandle {
    location: ArchiveLocation,
    file: File,
}

impl ArchiveHandle {
    /// Open an archive and validate its directory
    pub fn open(location: ArchiveLocation) -> Result<Self, ArchiveError> {
        let mut file = File::open(location.path()).map_err(|e| open_error(&location, e))?;
        let metadata = file.metadata().map_err(|e| unreadable(&location, e))?;
        if !metadata.is_file() {
            return Err(ArchiveError::Malformed {
                location: location.to_string(),
                reason: "not a regular file".to_string(),
            });
        }

        let bytes = read_from_start(&mut file).map_err(|e| unreadable(&location, e))?;
        let entries = scan_entries(&location, &bytes)?;
        debug!(
            target: "infrastructure_archive",
            archive = %location,
            entries = entries.len(),
            "archive validated"
        );
        Ok(Self { location, file })
    }

    pub fn location(&self) -> &ArchiveLocation {
        &self.location
    }

    /// Second handle onto the same open file
    ///
    /// Both handles share one file cursor; [`read`](Self::read) always
    /// rewinds before reading.
    pub fn duplicate(&self) -> Result<Self, ArchiveError> {
        let file = self
            .file
            .try_clone()
            .map_err(|e| unreadable(&self.location, e))?;
        Ok(Self {
            location: self.location.clone(),
            file,
        })
    }

    /// Read the whole archive and release the file handle
    pub fn read(mut self) -> Result<OpenArchive, ArchiveError> {
        let bytes = read_from_start(&mut self.file).map_err(|e| unreadable(&self.location, e))?;
        let entries = scan_entries(&self.location, &bytes)?;
        Ok(OpenArchive {
            location: self.location,
            bytes,
            entries,
        })
    }
}

impl fmt::Debug for ArchiveHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveHandle")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

/// How an entry's data is stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryCompression {
    Stored,
    Deflated,
    /// Any method this reader cannot decode
    Unsupported(String),
}

/// One file entry of an archive
#[derive(Clone)]
pub struct ArchiveEntry {
    path: String,
    compression: EntryCompression,
    wayfinder: rawzip::ZipArchiveEntryWayfinder,
}

impl ArchiveEntry {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn compression(&self) -> &EntryCompression {
        &self.compression
    }
}

impl fmt::Debug for ArchiveEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveEntry")
            .field("path", &self.path)
            .field("compression", &self.compression)
            .finish_non_exhaustive()
    }
}

/// Archive entry that holds a class
#[derive(Debug, Clone)]
pub struct ClassEntry {
    pub name: QualifiedName,
    pub entry: ArchiveEntry,
}

/// Fully read archive
pub struct OpenArchive {
    location: ArchiveLocation,
    bytes: Vec<u8>,
    entries: Vec<ArchiveEntry>,
}

impl OpenArchive {
    pub fn location(&self) -> &ArchiveLocation {
        &self.location
    }

    /// File entries in central-directory order
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Class entries in central-directory order
    ///
    /// The order is whatever the archive recorded; it is not sorted.
    pub fn class_entries(&self) -> Result<Vec<ClassEntry>, ArchiveError> {
        let mut classes = Vec::new();
        for entry in &self.entries {
            let Some(name) = QualifiedName::from_entry_path(&entry.path) else {
                continue;
            };
            let name = name.map_err(|e| ArchiveError::MalformedEntry {
                location: self.location.to_string(),
                entry: entry.path.clone(),
                reason: e.to_string(),
            })?;
            classes.push(ClassEntry {
                name,
                entry: entry.clone(),
            });
        }
        Ok(classes)
    }

    /// Decompressed contents of `entry`
    pub fn read_entry(&self, entry: &ArchiveEntry) -> Result<Vec<u8>, ArchiveError> {
        let malformed = |reason: String| ArchiveError::MalformedEntry {
            location: self.location.to_string(),
            entry: entry.path.clone(),
            reason,
        };

        let archive = rawzip::ZipArchive::from_slice(self.bytes.as_slice())
            .map_err(|e| malformed(format!("invalid zip archive: {e:?}")))?;
        let slice_entry = archive
            .get_entry(entry.wayfinder)
            .map_err(|e| malformed(format!("failed to get entry data: {e:?}")))?;
        let data = slice_entry.data();

        match &entry.compression {
            EntryCompression::Stored => Ok(data.to_vec()),
            EntryCompression::Deflated => {
                let mut out = Vec::new();
                DeflateDecoder::new(data)
                    .read_to_end(&mut out)
                    .map_err(|e| malformed(format!("deflate stream: {e}")))?;
                Ok(out)
            }
            EntryCompression::Unsupported(method) => {
                Err(malformed(format!("unsupported compression method: {method}")))
            }
        }
    }
}

impl fmt::Debug for OpenArchive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenArchive")
            .field("location", &self.location)
            .field("len", &self.bytes.len())
            .field("entries", &self.entries)
            .finish()
    }
}

fn read_from_start(file: &mut File) -> io::Result<Vec<u8>> {
    file.seek(SeekFrom::Start(0))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

fn scan_entries(location: &ArchiveLocation, bytes: &[u8]) -> Result<Vec<ArchiveEntry>, ArchiveError> {
    let malformed = |reason: String| ArchiveError::Malformed {
        location: location.to_string(),
        reason,
    };

    let archive = rawzip::ZipArchive::from_slice(bytes)
        .map_err(|e| malformed(format!("invalid zip archive: {e:?}")))?;

    let mut entries = Vec::new();
    for entry in archive.entries() {
        let entry = entry.map_err(|e| malformed(format!("zip entry error: {e:?}")))?;
        if entry.is_dir() {
            continue;
        }
        let path = entry
            .file_path()
            .try_normalize()
            .map_err(|e| malformed(format!("failed to normalize zip path: {e:?}")))?
            .as_ref()
            .to_string();
        let compression = match entry.compression_method() {
            rawzip::CompressionMethod::Store => EntryCompression::Stored,
            rawzip::CompressionMethod::Deflate => EntryCompression::Deflated,
            method => EntryCompression::Unsupported(format!("{method:?}")),
        };
        entries.push(ArchiveEntry {
            path,
            compression,
            wayfinder: entry.wayfinder(),
        });
    }
    Ok(entries)
}

fn open_error(location: &ArchiveLocation, err: io::Error) -> ArchiveError {
    if err.kind() == io::ErrorKind::NotFound {
        ArchiveError::NotFound {
            location: location.to_string(),
        }
    } else {
        unreadable(location, err)
    }
}

fn unreadable(location: &ArchiveLocation, source: io::Error) -> ArchiveError {
    ArchiveError::Unreadable {
        location: location.to_string(),
        source,
    }
}
