//! Infrastructure Layer: Archives
//!
//! Provides access to class archives (zip containers holding class
//! entries):
//! - Location resolution from paths and `file:` URLs
//! - Eager validation when an archive is registered
//! - Class entry enumeration in archive order and entry decompression
//! - Packing new archives
//!
//! Depends on the Entities layer for qualified names.

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

pub mod error;
pub mod handle;
pub mod location;
pub mod writer;

pub use error::ArchiveError;
pub use handle::{ArchiveEntry, ArchiveHandle, ClassEntry, EntryCompression, OpenArchive};
pub use location::ArchiveLocation;
pub use writer::{ArchiveWriter, Compression};
