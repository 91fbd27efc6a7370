//! Class Loading Errors

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

use entities_class_model::QualifiedName;
use infrastructure_archive::ArchiveError;
use thiserror::Error;

use crate::class_file::ClassFileError;

/// A class was found but could not be turned into a loadable class
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("invalid class file")]
    Format(#[from] ClassFileError),

    #[error("class file declares `{found}` but was requested as `{expected}`")]
    NameMismatch { expected: QualifiedName, found: String },

    #[error("class {class} references unresolved native symbol `{symbol}`")]
    UnresolvedNative { class: QualifiedName, symbol: String },

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

/// Class resolution errors
#[derive(Debug, Error)]
pub enum ClassLoadError {
    /// No visible source holds the class
    #[error("class not found: {name}")]
    NotFound { name: QualifiedName },

    /// The class bytes are invalid or cannot be linked
    #[error("cannot define class {name}")]
    Definition {
        name: QualifiedName,
        #[source]
        source: DefinitionError,
    },

    /// The static initializer failed, now or on an earlier attempt
    #[error("initializer of class {name} failed: {message}")]
    Initialization { name: QualifiedName, message: String },
}

impl ClassLoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClassLoadError::NotFound { .. })
    }
}
