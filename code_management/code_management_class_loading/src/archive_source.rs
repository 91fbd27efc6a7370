//! Archive Class Source
//!
//! Exposes the classes inside one archive and stages them. Staging reads
//! the archive, lists its class entries in archive order and resolves each
//! one through an isolated context chained beneath the caller's context.
//! The first class that cannot be loaded aborts the whole archive.

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

use std::collections::HashMap;
use std::sync::Arc;

use entities_class_model::{Class, QualifiedName};
use infrastructure_archive::{ArchiveEntry, ArchiveError, ArchiveHandle, ClassEntry, OpenArchive};
use thiserror::Error;
use tracing::{debug, info};

use crate::context::{IsolatedContext, LoadingContext, Resolution};
use crate::definer::ClassDefiner;
use crate::error::{ClassLoadError, DefinitionError};
use crate::registry::{ClassOrigin, ClassRegistry};
use crate::source::ClassSource;

/// Whether staging runs the static initializers of archive classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchivePolicy {
    /// Resolve and initialize every class in the archive
    #[default]
    InitializeAll,
    /// Define every class; initializers run when a class is first resolved
    /// for use
    DefineOnly,
}

/// Archive staging errors
#[derive(Debug, Error)]
pub enum ArchiveLoadError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("archive {location}: cannot load class {class}")]
    Class {
        location: String,
        class: QualifiedName,
        #[source]
        source: ClassLoadError,
    },
}

impl ArchiveLoadError {
    /// Location of the archive that failed
    pub fn location(&self) -> &str {
        match self {
            ArchiveLoadError::Archive(err) => err.location(),
            ArchiveLoadError::Class { location, .. } => location,
        }
    }
}

/// Classes resolved while staging one archive, in archive order
#[derive(Debug)]
pub struct ArchiveReport {
    pub location: String,
    pub classes: Vec<Resolution>,
}

/// Class source backed by the entries of one open archive
pub struct ArchiveClassSource<'a> {
    archive: &'a OpenArchive,
    definer: &'a dyn ClassDefiner,
    entries: HashMap<QualifiedName, ArchiveEntry>,
}

impl<'a> ArchiveClassSource<'a> {
    pub fn new(archive: &'a OpenArchive, definer: &'a dyn ClassDefiner, classes: &[ClassEntry]) -> Self {
        let mut entries = HashMap::with_capacity(classes.len());
        for class in classes {
            entries
                .entry(class.name.clone())
                .or_insert_with(|| class.entry.clone());
        }
        Self {
            archive,
            definer,
            entries,
        }
    }

    /// Stage every class of an archive
    ///
    /// Consumes `handle`; the file is closed once the archive has been read,
    /// whether or not staging succeeds.
    pub fn stage(
        handle: ArchiveHandle,
        parent: &dyn LoadingContext,
        registry: Arc<ClassRegistry>,
        definer: &dyn ClassDefiner,
        policy: ArchivePolicy,
    ) -> Result<ArchiveReport, ArchiveLoadError> {
        let location = handle.location().to_string();
        let archive = handle.read()?;
        let class_entries = archive.class_entries()?;
        debug!(
            target: "class_loading::archive",
            archive = %location,
            classes = class_entries.len(),
            ?policy,
            "staging archive"
        );

        let source = ArchiveClassSource::new(&archive, definer, &class_entries);
        let context = IsolatedContext::new(
            parent,
            registry,
            source,
            ClassOrigin::Archive(location.clone()),
        );

        let mut classes = Vec::with_capacity(class_entries.len());
        for ClassEntry { name, .. } in &class_entries {
            let resolution = match policy {
                ArchivePolicy::InitializeAll => context.resolve_and_initialize(name),
                ArchivePolicy::DefineOnly => context.load_class(name),
            }
            .map_err(|source| ArchiveLoadError::Class {
                location: location.clone(),
                class: name.clone(),
                source,
            })?;

            info!(
                target: "class_loading::archive",
                archive = %location,
                class = %name,
                origin = %resolution.class.origin(),
                newly_defined = resolution.newly_defined,
                "loaded class"
            );
            classes.push(resolution);
        }

        Ok(ArchiveReport { location, classes })
    }
}

impl ClassSource for ArchiveClassSource<'_> {
    fn find_class(&self, name: &QualifiedName) -> Result<Option<Arc<dyn Class>>, DefinitionError> {
        let Some(entry) = self.entries.get(name) else {
            return Ok(None);
        };
        let bytes = self.archive.read_entry(entry)?;
        self.definer.define(name, &bytes).map(Some)
    }
}
