//! Loading Contexts
//!
//! A loading context resolves qualified names to loaded classes. The base
//! context sees the registry and the host's builtin classes. An isolated
//! context is created per archive: it keeps its own namespace, delegates
//! to its parent first and only then defines classes from its own source.

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

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use entities_class_model::QualifiedName;
use tracing::trace;

use crate::error::{ClassLoadError, DefinitionError};
use crate::registry::{ClassOrigin, ClassRegistry, LoadedClass};
use crate::source::ClassSource;

/// Outcome of a successful class lookup
#[derive(Debug, Clone)]
pub struct Resolution {
    pub class: Arc<LoadedClass>,
    /// Whether this lookup added the class to the registry
    pub newly_defined: bool,
}

/// Resolves qualified names to loaded classes
pub trait LoadingContext {
    /// Find or define a class without running its initializer
    fn load_class(&self, name: &QualifiedName) -> Result<Resolution, ClassLoadError>;

    /// Find or define a class and run its initializer if it has not run
    fn resolve_and_initialize(&self, name: &QualifiedName) -> Result<Resolution, ClassLoadError> {
        let resolution = self.load_class(name)?;
        resolution.class.ensure_initialized()?;
        Ok(resolution)
    }
}

/// Look `name` up in `source` and define it into `registry`
fn define_from(
    source: &dyn ClassSource,
    registry: &ClassRegistry,
    name: &QualifiedName,
    origin: &ClassOrigin,
) -> Result<Option<Resolution>, ClassLoadError> {
    let definition_error = |source: DefinitionError| ClassLoadError::Definition {
        name: name.clone(),
        source,
    };

    let Some(class) = source.find_class(name).map_err(definition_error)? else {
        return Ok(None);
    };
    if class.name() != name {
        return Err(definition_error(DefinitionError::NameMismatch {
            expected: name.clone(),
            found: class.name().to_string(),
        }));
    }

    let (class, newly_defined) = registry.define(class, origin.clone());
    trace!(
        target: "class_loading::registry",
        class = %name,
        origin = %class.origin(),
        newly_defined,
        "class defined"
    );
    Ok(Some(Resolution {
        class,
        newly_defined,
    }))
}

/// Root context: the registry plus the base class source
#[derive(Clone)]
pub struct BaseContext {
    registry: Arc<ClassRegistry>,
    source: Arc<dyn ClassSource>,
}

impl BaseContext {
    pub fn new(registry: Arc<ClassRegistry>, source: Arc<dyn ClassSource>) -> Self {
        Self { registry, source }
    }

    pub fn registry(&self) -> &Arc<ClassRegistry> {
        &self.registry
    }
}

impl LoadingContext for BaseContext {
    fn load_class(&self, name: &QualifiedName) -> Result<Resolution, ClassLoadError> {
        if let Some(class) = self.registry.get(name.as_str()) {
            return Ok(Resolution {
                class,
                newly_defined: false,
            });
        }
        define_from(self.source.as_ref(), &self.registry, name, &ClassOrigin::Base)?
            .ok_or_else(|| ClassLoadError::NotFound { name: name.clone() })
    }
}

/// Per-archive context chained beneath a parent
///
/// Lives only for the staging of one archive. Classes it defines stay
/// resident in the registry after the context is dropped.
pub struct IsolatedContext<'p, S: ClassSource> {
    parent: &'p dyn LoadingContext,
    registry: Arc<ClassRegistry>,
    source: S,
    origin: ClassOrigin,
    namespace: RefCell<HashMap<QualifiedName, Arc<LoadedClass>>>,
}

impl<'p, S: ClassSource> IsolatedContext<'p, S> {
    pub fn new(
        parent: &'p dyn LoadingContext,
        registry: Arc<ClassRegistry>,
        source: S,
        origin: ClassOrigin,
    ) -> Self {
        Self {
            parent,
            registry,
            source,
            origin,
            namespace: RefCell::new(HashMap::new()),
        }
    }

    pub fn origin(&self) -> &ClassOrigin {
        &self.origin
    }

    /// Whether `name` has been resolved through this context
    pub fn is_visible(&self, name: &str) -> bool {
        self.namespace.borrow().contains_key(name)
    }

    fn remember(&self, resolution: &Resolution) {
        self.namespace.borrow_mut().insert(
            resolution.class.name().clone(),
            Arc::clone(&resolution.class),
        );
    }
}

impl<S: ClassSource> LoadingContext for IsolatedContext<'_, S> {
    fn load_class(&self, name: &QualifiedName) -> Result<Resolution, ClassLoadError> {
        if let Some(class) = self.namespace.borrow().get(name) {
            return Ok(Resolution {
                class: Arc::clone(class),
                newly_defined: false,
            });
        }

        match self.parent.load_class(name) {
            Ok(resolution) => {
                self.remember(&resolution);
                return Ok(resolution);
            }
            Err(err) if !err.is_not_found() => return Err(err),
            Err(_) => {}
        }

        let resolution = define_from(&self.source, &self.registry, name, &self.origin)?
            .ok_or_else(|| ClassLoadError::NotFound { name: name.clone() })?;
        self.remember(&resolution);
        Ok(resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::BuiltinClasses;
    use entities_class_model::{Class, NativeClass};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn name(s: &str) -> QualifiedName {
        QualifiedName::parse(s).unwrap()
    }

    fn class(s: &str) -> NativeClass {
        NativeClass::builder(name(s)).build()
    }

    /// Source holding a fixed set of classes
    struct MapSource(HashMap<QualifiedName, Arc<dyn Class>>);

    impl MapSource {
        fn of(names: &[&str]) -> Self {
            Self(
                names
                    .iter()
                    .map(|n| (name(n), Arc::new(class(n)) as Arc<dyn Class>))
                    .collect(),
            )
        }
    }

    impl ClassSource for MapSource {
        fn find_class(
            &self,
            name: &QualifiedName,
        ) -> Result<Option<Arc<dyn Class>>, DefinitionError> {
            Ok(self.0.get(name).map(Arc::clone))
        }
    }

    fn base(builtins: &[&str]) -> BaseContext {
        let source = BuiltinClasses::new();
        for n in builtins {
            source.register(class(n));
        }
        BaseContext::new(Arc::new(ClassRegistry::new()), Arc::new(source))
    }

    #[test]
    fn test_base_context_defines_once() {
        let base = base(&["host.Util"]);
        let first = base.load_class(&name("host.Util")).unwrap();
        let second = base.load_class(&name("host.Util")).unwrap();

        assert!(first.newly_defined);
        assert!(!second.newly_defined);
        assert!(Arc::ptr_eq(&first.class, &second.class));
        assert_eq!(first.class.origin(), &ClassOrigin::Base);
    }

    #[test]
    fn test_base_context_not_found() {
        let base = base(&[]);
        let err = base.load_class(&name("host.Missing")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_isolated_context_prefers_parent() {
        let base = base(&["shared.Name"]);
        let origin = ClassOrigin::Archive("a.jar".into());
        let isolated = IsolatedContext::new(
            &base,
            Arc::clone(base.registry()),
            MapSource::of(&["shared.Name", "a.Only"]),
            origin.clone(),
        );

        let shared = isolated.load_class(&name("shared.Name")).unwrap();
        assert_eq!(shared.class.origin(), &ClassOrigin::Base);

        let own = isolated.load_class(&name("a.Only")).unwrap();
        assert_eq!(own.class.origin(), &origin);
        assert!(own.newly_defined);
        assert!(isolated.is_visible("a.Only"));
    }

    #[test]
    fn test_isolated_classes_stay_resident_after_drop() {
        let base = base(&[]);
        {
            let isolated = IsolatedContext::new(
                &base,
                Arc::clone(base.registry()),
                MapSource::of(&["a.Only"]),
                ClassOrigin::Archive("a.jar".into()),
            );
            isolated.load_class(&name("a.Only")).unwrap();
        }
        let resident = base.load_class(&name("a.Only")).unwrap();
        assert!(!resident.newly_defined);
    }

    #[test]
    fn test_sibling_archives_do_not_collide() {
        let base = base(&[]);
        let first = IsolatedContext::new(
            &base,
            Arc::clone(base.registry()),
            MapSource::of(&["dup.Name"]),
            ClassOrigin::Archive("one.jar".into()),
        );
        let defined = first.load_class(&name("dup.Name")).unwrap();
        assert!(defined.newly_defined);

        let second = IsolatedContext::new(
            &base,
            Arc::clone(base.registry()),
            MapSource::of(&["dup.Name"]),
            ClassOrigin::Archive("two.jar".into()),
        );
        let resolved = second.load_class(&name("dup.Name")).unwrap();
        assert!(!resolved.newly_defined);
        assert_eq!(
            resolved.class.origin(),
            &ClassOrigin::Archive("one.jar".into())
        );
        assert_eq!(base.registry().len(), 1);
    }

    #[test]
    fn test_initializer_runs_once() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let source = BuiltinClasses::new();
        source.register(
            NativeClass::builder(name("host.Init"))
                .initializer(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
                .build(),
        );
        let base = BaseContext::new(Arc::new(ClassRegistry::new()), Arc::new(source));

        base.resolve_and_initialize(&name("host.Init")).unwrap();
        base.resolve_and_initialize(&name("host.Init")).unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_initializer_is_sticky() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let source = BuiltinClasses::new();
        source.register(
            NativeClass::builder(name("host.Broken"))
                .initializer(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    anyhow::bail!("boom")
                })
                .build(),
        );
        let base = BaseContext::new(Arc::new(ClassRegistry::new()), Arc::new(source));

        for _ in 0..2 {
            let err = base.resolve_and_initialize(&name("host.Broken")).unwrap_err();
            assert!(matches!(
                err,
                ClassLoadError::Initialization { ref message, .. } if message == "boom"
            ));
        }
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }
}
