//! Load Plan
//!
//! What a program loader stages: the entry class, extra classes to
//! pre-load and archives, each in insertion order. Names are kept as given
//! and validated when the plan is staged, before any I/O.

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

use entities_class_model::{NameError, QualifiedName};
use infrastructure_archive::ArchiveHandle;

use crate::error::ConfigurationError;

#[derive(Debug)]
pub struct LoadPlan {
    entry_class: String,
    extra_classes: Vec<String>,
    archives: Vec<ArchiveHandle>,
}

impl LoadPlan {
    pub fn new(entry_class: impl Into<String>) -> Self {
        Self {
            entry_class: entry_class.into(),
            extra_classes: Vec::new(),
            archives: Vec::new(),
        }
    }

    pub fn entry_class(&self) -> &str {
        &self.entry_class
    }

    pub fn extra_classes(&self) -> &[String] {
        &self.extra_classes
    }

    pub fn archives(&self) -> &[ArchiveHandle] {
        &self.archives
    }

    pub fn push_extra_classes<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_classes.extend(names.into_iter().map(Into::into));
    }

    pub fn push_archives(&mut self, handles: impl IntoIterator<Item = ArchiveHandle>) {
        self.archives.extend(handles);
    }

    /// Close every queued archive, returning how many were closed
    pub fn release_archives(&mut self) -> usize {
        self.archives.drain(..).count()
    }

    /// Validated entry class name
    pub fn entry_name(&self) -> Result<QualifiedName, ConfigurationError> {
        QualifiedName::parse(self.entry_class.as_str()).map_err(|source| match source {
            NameError::Empty => ConfigurationError::EmptyEntryClass,
            source => ConfigurationError::InvalidEntryClass {
                name: self.entry_class.clone(),
                source,
            },
        })
    }

    /// Validated extra class names, in load order
    pub fn extra_names(&self) -> Result<Vec<QualifiedName>, ConfigurationError> {
        self.extra_classes
            .iter()
            .map(|name| {
                QualifiedName::parse(name.as_str()).map_err(|source| {
                    ConfigurationError::InvalidExtraClass {
                        name: name.clone(),
                        source,
                    }
                })
            })
            .collect()
    }
}
