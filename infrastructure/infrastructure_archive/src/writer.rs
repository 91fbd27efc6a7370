//! Archive Writer
//!
//! Packs files into a zip container that [`ArchiveHandle`] can read.
//! Entries are written in insertion order, stored or deflated, with
//! CRC-32 checksums.
//!
//! [`ArchiveHandle`]: crate::handle::ArchiveHandle

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

use std::io::{self, Write};
use std::path::Path;

use entities_class_model::QualifiedName;
use flate2::write::DeflateEncoder;

const LOCAL_HEADER_SIGNATURE: u32 = 0x0403_4b50;
const CENTRAL_HEADER_SIGNATURE: u32 = 0x0201_4b50;
const END_OF_CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x0605_4b50;
const VERSION: u16 = 20;
const METHOD_STORE: u16 = 0;
const METHOD_DEFLATE: u16 = 8;
/// 1980-01-01, the earliest DOS date
const DOS_DATE: u16 = (1 << 5) | 1;

/// Entry compression for [`ArchiveWriter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    Stored,
    #[default]
    Deflated,
}

/// In-memory zip writer
#[derive(Debug, Default)]
pub struct ArchiveWriter {
    body: Vec<u8>,
    central: Vec<u8>,
    count: u16,
}

impl ArchiveWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries written so far
    pub fn len(&self) -> usize {
        usize::from(self.count)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Add a directory entry; a trailing `/` is appended if missing
    pub fn add_directory(&mut self, path: &str) -> &mut Self {
        let mut path = path.to_string();
        if !path.ends_with('/') {
            path.push('/');
        }
        self.push_entry(&path, METHOD_STORE, 0, &[], 0)
    }

    pub fn add_file(&mut self, path: &str, data: &[u8], compression: Compression) -> &mut Self {
        let crc = crc32fast::hash(data);
        let size = data.len() as u32;
        match compression {
            Compression::Stored => self.push_entry(path, METHOD_STORE, crc, data, size),
            // in-memory deflate; fall back to stored on error
            Compression::Deflated => match deflate(data) {
                Ok(packed) => self.push_entry(path, METHOD_DEFLATE, crc, &packed, size),
                Err(_) => self.push_entry(path, METHOD_STORE, crc, data, size),
            },
        }
    }

    /// Add a class under its entry path (`a/b/C.class`)
    pub fn add_class(&mut self, name: &QualifiedName, data: &[u8], compression: Compression) -> &mut Self {
        self.add_file(&name.to_entry_path(), data, compression)
    }

    /// Append the central directory and return the archive bytes
    pub fn finish(self) -> Vec<u8> {
        let Self {
            mut body,
            central,
            count,
        } = self;
        let central_offset = body.len() as u32;
        let central_size = central.len() as u32;
        body.extend_from_slice(&central);

        put_u32(&mut body, END_OF_CENTRAL_DIRECTORY_SIGNATURE);
        put_u16(&mut body, 0); // this disk
        put_u16(&mut body, 0); // central directory disk
        put_u16(&mut body, count);
        put_u16(&mut body, count);
        put_u32(&mut body, central_size);
        put_u32(&mut body, central_offset);
        put_u16(&mut body, 0); // comment length
        body
    }

    /// Finish and write the archive to `path`
    pub fn write_to(self, path: impl AsRef<Path>) -> io::Result<()> {
        std::fs::write(path, self.finish())
    }

    fn push_entry(
        &mut self,
        path: &str,
        method: u16,
        crc: u32,
        data: &[u8],
        uncompressed_size: u32,
    ) -> &mut Self {
        let offset = self.body.len() as u32;
        let name = path.as_bytes();
        let compressed_size = data.len() as u32;

        let body = &mut self.body;
        put_u32(body, LOCAL_HEADER_SIGNATURE);
        put_u16(body, VERSION);
        put_u16(body, 0); // flags
        put_u16(body, method);
        put_u16(body, 0); // time
        put_u16(body, DOS_DATE);
        put_u32(body, crc);
        put_u32(body, compressed_size);
        put_u32(body, uncompressed_size);
        put_u16(body, name.len() as u16);
        put_u16(body, 0); // extra length
        body.extend_from_slice(name);
        body.extend_from_slice(data);

        let central = &mut self.central;
        put_u32(central, CENTRAL_HEADER_SIGNATURE);
        put_u16(central, VERSION); // made by
        put_u16(central, VERSION); // needed
        put_u16(central, 0);
        put_u16(central, method);
        put_u16(central, 0);
        put_u16(central, DOS_DATE);
        put_u32(central, crc);
        put_u32(central, compressed_size);
        put_u32(central, uncompressed_size);
        put_u16(central, name.len() as u16);
        put_u16(central, 0); // extra length
        put_u16(central, 0); // comment length
        put_u16(central, 0); // disk number
        put_u16(central, 0); // internal attributes
        put_u32(central, 0); // external attributes
        put_u32(central, offset);
        central.extend_from_slice(name);

        self.count += 1;
        self
    }
}

fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

fn put_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}
