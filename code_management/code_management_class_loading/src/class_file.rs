//! Class File Reader
//!
//! Provides class file parsing and encoding. A class file is a chunked
//! container in the IFF style:
//!
//! ```text
//! "FOR1" u32 form_length "CLAS" { id[4] u32 length payload pad }*
//! ```
//!
//! All integers are big-endian and every chunk is padded to a multiple of
//! four bytes. Known chunks:
//!
//! - `Name` (required): UTF-8 qualified class name
//! - `Mthd` (required): method table. `u32` count, then per method a
//!   `u16`-prefixed name, `u8` flags (bit 0 public, bit 1 static), `u8`
//!   parameter count, one `u8` per parameter (0 string list, 1 window),
//!   and the `u16`-prefixed native symbol implementing it
//! - `Init` (optional): `u16`-prefixed native symbol of the static
//!   initializer
//!
//! Unknown chunks are skipped.

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

use entities_class_model::{MethodDescriptor, Modifiers, ParamType};
use thiserror::Error;

const FORM_ID: &[u8; 4] = b"FOR1";
const FORM_TYPE: &[u8; 4] = b"CLAS";
const NAME_CHUNK: &[u8; 4] = b"Name";
const METHOD_CHUNK: &[u8; 4] = b"Mthd";
const INIT_CHUNK: &[u8; 4] = b"Init";

/// Class file read errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassFileError {
    #[error("corrupt file header")]
    CorruptFileHeader,
    #[error("chunk `{0}` runs past the end of the file")]
    TruncatedChunk(String),
    #[error("chunk `{0}` appears more than once")]
    DuplicateChunk(String),
    #[error("missing name chunk")]
    MissingNameChunk,
    #[error("corrupt name chunk")]
    CorruptNameChunk,
    #[error("missing method table")]
    MissingMethodTable,
    #[error("corrupt method table: {0}")]
    CorruptMethodTable(String),
    #[error("corrupt init chunk")]
    CorruptInitChunk,
    #[error("{field} is too long to encode ({len}, at most {max})")]
    FieldTooLong {
        field: String,
        len: usize,
        max: usize,
    },
}

/// Method table entry: descriptor plus the native symbol bound to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodEntry {
    pub descriptor: MethodDescriptor,
    pub symbol: String,
}

/// Parsed class file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFile {
    pub name: String,
    pub methods: Vec<MethodEntry>,
    /// Native symbol of the static initializer
    pub initializer: Option<String>,
}

impl ClassFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            initializer: None,
        }
    }

    pub fn with_method(mut self, descriptor: MethodDescriptor, symbol: impl Into<String>) -> Self {
        self.methods.push(MethodEntry {
            descriptor,
            symbol: symbol.into(),
        });
        self
    }

    pub fn with_initializer(mut self, symbol: impl Into<String>) -> Self {
        self.initializer = Some(symbol.into());
        self
    }

    /// Read and parse a class file
    pub fn parse(data: &[u8]) -> Result<Self, ClassFileError> {
        if data.len() < 12 || &data[0..4] != FORM_ID || &data[8..12] != FORM_TYPE {
            return Err(ClassFileError::CorruptFileHeader);
        }
        let form_len = u32::from_be_bytes([data[4], data[5], data[6], data[7]]) as usize;
        if form_len != data.len() - 8 {
            return Err(ClassFileError::CorruptFileHeader);
        }

        let mut name = None;
        let mut methods = None;
        let mut initializer = None;

        let mut pos = 12;
        while pos < data.len() {
            if data.len() - pos < 8 {
                return Err(ClassFileError::TruncatedChunk(String::from("<header>")));
            }
            let id = &data[pos..pos + 4];
            let id_str = String::from_utf8_lossy(id).into_owned();
            let len = u32::from_be_bytes([data[pos + 4], data[pos + 5], data[pos + 6], data[pos + 7]])
                as usize;
            let start = pos + 8;
            let end = start
                .checked_add(len)
                .filter(|end| *end <= data.len())
                .ok_or_else(|| ClassFileError::TruncatedChunk(id_str.clone()))?;
            let payload = &data[start..end];

            if id == NAME_CHUNK {
                if name.is_some() {
                    return Err(ClassFileError::DuplicateChunk(id_str));
                }
                let text = std::str::from_utf8(payload).map_err(|_| ClassFileError::CorruptNameChunk)?;
                if text.is_empty() {
                    return Err(ClassFileError::CorruptNameChunk);
                }
                name = Some(text.to_string());
            } else if id == METHOD_CHUNK {
                if methods.is_some() {
                    return Err(ClassFileError::DuplicateChunk(id_str));
                }
                methods = Some(parse_methods(payload)?);
            } else if id == INIT_CHUNK {
                if initializer.is_some() {
                    return Err(ClassFileError::DuplicateChunk(id_str));
                }
                initializer = Some(parse_init(payload)?);
            }

            pos = end + padding(len);
            if pos > data.len() {
                return Err(ClassFileError::TruncatedChunk(id_str));
            }
        }

        Ok(Self {
            name: name.ok_or(ClassFileError::MissingNameChunk)?,
            methods: methods.ok_or(ClassFileError::MissingMethodTable)?,
            initializer,
        })
    }

    /// Encode into the class file container
    ///
    /// Fails if a name, symbol or parameter list does not fit its length
    /// field.
    pub fn encode(&self) -> Result<Vec<u8>, ClassFileError> {
        let mut body = Vec::new();
        body.extend_from_slice(FORM_TYPE);

        put_chunk(&mut body, NAME_CHUNK, self.name.as_bytes())?;

        let mut table = Vec::new();
        table.extend_from_slice(&fit::<u32>("method table", self.methods.len())?.to_be_bytes());
        for method in &self.methods {
            put_str16(&mut table, "method name", &method.descriptor.name)?;
            table.push(method.descriptor.modifiers.bits());
            table.push(fit::<u8>("parameter list", method.descriptor.params.len())?);
            table.extend(method.descriptor.params.iter().map(|p| p.code()));
            put_str16(&mut table, "native symbol", &method.symbol)?;
        }
        put_chunk(&mut body, METHOD_CHUNK, &table)?;

        if let Some(init) = &self.initializer {
            let mut payload = Vec::new();
            put_str16(&mut payload, "initializer symbol", init)?;
            put_chunk(&mut body, INIT_CHUNK, &payload)?;
        }

        let mut out = Vec::with_capacity(body.len() + 8);
        out.extend_from_slice(FORM_ID);
        out.extend_from_slice(&fit::<u32>("class file", body.len())?.to_be_bytes());
        out.extend_from_slice(&body);
        Ok(out)
    }
}

/// Unsigned length field of the container
trait LengthField: TryFrom<usize> {
    const MAX_LEN: usize;
}

impl LengthField for u8 {
    const MAX_LEN: usize = u8::MAX as usize;
}

impl LengthField for u16 {
    const MAX_LEN: usize = u16::MAX as usize;
}

impl LengthField for u32 {
    const MAX_LEN: usize = u32::MAX as usize;
}

/// Narrow a length to its field width
fn fit<T: LengthField>(field: &str, len: usize) -> Result<T, ClassFileError> {
    T::try_from(len).map_err(|_| ClassFileError::FieldTooLong {
        field: field.to_string(),
        len,
        max: T::MAX_LEN,
    })
}

fn padding(len: usize) -> usize {
    (4 - len % 4) % 4
}

fn put_chunk(out: &mut Vec<u8>, id: &[u8; 4], payload: &[u8]) -> Result<(), ClassFileError> {
    let len = fit::<u32>("chunk", payload.len())?;
    out.extend_from_slice(id);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(payload);
    out.resize(out.len() + padding(payload.len()), 0);
    Ok(())
}

fn put_str16(out: &mut Vec<u8>, field: &str, s: &str) -> Result<(), ClassFileError> {
    out.extend_from_slice(&fit::<u16>(field, s.len())?.to_be_bytes());
    out.extend_from_slice(s.as_bytes());
    Ok(())
}

/// Bounds-checked big-endian reader over a chunk payload
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn bytes(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n).filter(|end| *end <= self.data.len())?;
        let out = &self.data[self.pos..end];
        self.pos = end;
        Some(out)
    }

    fn u8(&mut self) -> Option<u8> {
        self.bytes(1).map(|b| b[0])
    }

    fn u16(&mut self) -> Option<u16> {
        self.bytes(2).map(|b| u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Option<u32> {
        self.bytes(4).map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn str16(&mut self) -> Option<&'a str> {
        let len = self.u16()? as usize;
        std::str::from_utf8(self.bytes(len)?).ok()
    }

    fn is_empty(&self) -> bool {
        self.pos == self.data.len()
    }
}

fn parse_methods(payload: &[u8]) -> Result<Vec<MethodEntry>, ClassFileError> {
    let corrupt = |what: &str| ClassFileError::CorruptMethodTable(what.to_string());
    let mut reader = Reader::new(payload);
    let count = reader.u32().ok_or_else(|| corrupt("missing method count"))?;

    let mut methods = Vec::new();
    for index in 0..count {
        let name = reader
            .str16()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| corrupt(&format!("bad name for method {index}")))?;
        let flags = reader
            .u8()
            .ok_or_else(|| corrupt(&format!("missing flags for `{name}`")))?;
        let modifiers = Modifiers::from_bits(flags)
            .ok_or_else(|| corrupt(&format!("unknown flags {flags:#04x} on `{name}`")))?;
        let param_count = reader
            .u8()
            .ok_or_else(|| corrupt(&format!("missing parameter count for `{name}`")))?;
        let mut params = Vec::with_capacity(param_count as usize);
        for _ in 0..param_count {
            let code = reader
                .u8()
                .ok_or_else(|| corrupt(&format!("truncated parameters of `{name}`")))?;
            let param = ParamType::from_code(code)
                .ok_or_else(|| corrupt(&format!("unknown parameter type {code} on `{name}`")))?;
            params.push(param);
        }
        let symbol = reader
            .str16()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| corrupt(&format!("bad native symbol for `{name}`")))?;
        methods.push(MethodEntry {
            descriptor: MethodDescriptor::new(name, params, modifiers),
            symbol: symbol.to_string(),
        });
    }

    if !reader.is_empty() {
        return Err(corrupt("trailing bytes"));
    }
    Ok(methods)
}

fn parse_init(payload: &[u8]) -> Result<String, ClassFileError> {
    let mut reader = Reader::new(payload);
    let symbol = reader
        .str16()
        .filter(|s| !s.is_empty())
        .ok_or(ClassFileError::CorruptInitChunk)?;
    if !reader.is_empty() {
        return Err(ClassFileError::CorruptInitChunk);
    }
    Ok(symbol.to_string())
}
