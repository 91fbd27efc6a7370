//! Class Runtime
//!
//! Bundles what a loader needs from the class loading layer: the registry,
//! the base class source and the definer used for archive classes. The
//! global runtime wires the process-wide singletons together; tests and
//! embedders build their own with [`ClassRuntime::new`].

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
use std::sync::Arc;

use infrastructure_archive::ArchiveHandle;

use crate::archive_source::{ArchiveClassSource, ArchiveLoadError, ArchivePolicy, ArchiveReport};
use crate::context::BaseContext;
use crate::definer::{ClassDefiner, LinkingDefiner};
use crate::natives::{get_global_natives, NativeTable};
use crate::registry::{get_global_class_registry, ClassRegistry};
use crate::source::{get_global_builtin_classes, BuiltinClasses, ClassSource};

#[derive(Clone)]
pub struct ClassRuntime {
    registry: Arc<ClassRegistry>,
    base_source: Arc<dyn ClassSource>,
    definer: Arc<dyn ClassDefiner>,
}

impl ClassRuntime {
    pub fn new(
        registry: Arc<ClassRegistry>,
        base_source: Arc<dyn ClassSource>,
        definer: Arc<dyn ClassDefiner>,
    ) -> Self {
        Self {
            registry,
            base_source,
            definer,
        }
    }

    /// Runtime over the global registry, builtin classes and natives
    pub fn global() -> Self {
        Self::new(
            get_global_class_registry(),
            get_global_builtin_classes(),
            Arc::new(LinkingDefiner::new(get_global_natives())),
        )
    }

    /// Runtime with a fresh registry of its own
    pub fn standalone(builtins: Arc<BuiltinClasses>, natives: Arc<NativeTable>) -> Self {
        Self::new(
            Arc::new(ClassRegistry::new()),
            builtins,
            Arc::new(LinkingDefiner::new(natives)),
        )
    }

    pub fn registry(&self) -> &Arc<ClassRegistry> {
        &self.registry
    }

    pub fn base_context(&self) -> BaseContext {
        BaseContext::new(Arc::clone(&self.registry), Arc::clone(&self.base_source))
    }

    /// Stage every class of an archive beneath the base context
    pub fn stage_archive(
        &self,
        handle: ArchiveHandle,
        policy: ArchivePolicy,
    ) -> Result<ArchiveReport, ArchiveLoadError> {
        let base = self.base_context();
        ArchiveClassSource::stage(
            handle,
            &base,
            Arc::clone(&self.registry),
            self.definer.as_ref(),
            policy,
        )
    }
}

impl fmt::Debug for ClassRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassRuntime")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::LoadingContext;
    use entities_class_model::{NativeClass, QualifiedName};

    #[test]
    fn test_standalone_runtimes_are_isolated() {
        let builtins = Arc::new(BuiltinClasses::new());
        builtins.register(NativeClass::builder(QualifiedName::parse("host.A").unwrap()).build());
        let natives = Arc::new(NativeTable::new());

        let one = ClassRuntime::standalone(Arc::clone(&builtins), Arc::clone(&natives));
        let two = ClassRuntime::standalone(builtins, natives);

        one.base_context()
            .load_class(&QualifiedName::parse("host.A").unwrap())
            .unwrap();
        assert_eq!(one.registry().len(), 1);
        assert!(two.registry().is_empty());
    }

    #[test]
    fn test_global_runtime_shares_registry() {
        let a = ClassRuntime::global();
        let b = ClassRuntime::global();
        assert!(Arc::ptr_eq(a.registry(), b.registry()));
    }
}
