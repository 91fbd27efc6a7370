//! Qualified Names
//!
//! Dotted class names (`com.foo.Bar`) and the entry-path mapping used when
//! enumerating archives (`com/foo/Bar.class`).

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

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Suffix that marks an archive entry as a class
pub const CLASS_FILE_SUFFIX: &str = ".class";

/// Namespace separator inside a qualified name
const NAMESPACE_SEPARATOR: char = '.';

/// Path separator inside an archive
const PATH_SEPARATOR: char = '/';

/// Invalid qualified name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("class name is empty")]
    Empty,
    #[error("class name `{0}` has an empty segment")]
    EmptySegment(String),
    #[error("class name `{name}` contains illegal character {ch:?}")]
    IllegalCharacter { name: String, ch: char },
}

/// Fully-qualified, validated class name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName(String);

impl QualifiedName {
    /// Validate and wrap a dotted class name
    pub fn parse(name: impl Into<String>) -> Result<Self, NameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        for segment in name.split(NAMESPACE_SEPARATOR) {
            if segment.is_empty() {
                return Err(NameError::EmptySegment(name));
            }
            if let Some(ch) = segment
                .chars()
                .find(|c| c.is_whitespace() || matches!(c, '/' | '\\' | ';' | '['))
            {
                return Err(NameError::IllegalCharacter { name, ch });
            }
        }
        Ok(Self(name))
    }

    /// Map an archive entry path to the class it holds
    ///
    /// Returns `None` for entries that are not class files. The suffix is
    /// stripped and path separators become namespace separators, so
    /// `com/foo/Bar.class` maps to `com.foo.Bar`.
    pub fn from_entry_path(path: &str) -> Option<Result<Self, NameError>> {
        let stem = path.strip_suffix(CLASS_FILE_SUFFIX)?;
        Some(Self::parse(stem.replace(PATH_SEPARATOR, ".")))
    }

    /// Archive entry path this class would be stored under
    pub fn to_entry_path(&self) -> String {
        let mut path = self.0.replace(NAMESPACE_SEPARATOR, "/");
        path.push_str(CLASS_FILE_SUFFIX);
        path
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last segment of the name
    pub fn simple_name(&self) -> &str {
        self.0
            .rsplit_once(NAMESPACE_SEPARATOR)
            .map_or(self.0.as_str(), |(_, simple)| simple)
    }

    /// Everything before the last segment, if any
    pub fn package(&self) -> Option<&str> {
        self.0.rsplit_once(NAMESPACE_SEPARATOR).map(|(pkg, _)| pkg)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for QualifiedName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for QualifiedName {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl AsRef<str> for QualifiedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for QualifiedName {
    fn borrow(&self) -> &str {
        &self.0
    }
}
