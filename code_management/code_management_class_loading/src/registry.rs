//! Class Registry
//!
//! Process-wide table of loaded classes. The table only grows: defining a
//! name that is already resident returns the resident class, and there is
//! no removal operation. Load order is recorded so staging can be
//! observed.

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
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};
use std::thread::{self, ThreadId};

use entities_class_model::{Class, QualifiedName};
use tracing::{debug, trace};

use crate::error::ClassLoadError;

/// Where a loaded class came from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassOrigin {
    /// The base class source visible to the caller
    Base,
    /// An archive, by location
    Archive(String),
}

impl fmt::Display for ClassOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassOrigin::Base => f.write_str("base"),
            ClassOrigin::Archive(location) => write!(f, "archive {location}"),
        }
    }
}

/// Registry entry for a loaded class
pub struct LoadedClass {
    class: Arc<dyn Class>,
    origin: ClassOrigin,
    /// Outcome of the static initializer, once it has run
    init: OnceLock<Result<(), String>>,
    /// Thread running the initializer, while it runs
    initializing: Mutex<Option<ThreadId>>,
}

/// Clears the initializing thread when the initializer returns or unwinds
struct InitializingGuard<'a>(&'a Mutex<Option<ThreadId>>);

impl<'a> InitializingGuard<'a> {
    fn enter(slot: &'a Mutex<Option<ThreadId>>) -> Self {
        *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(thread::current().id());
        Self(slot)
    }
}

impl Drop for InitializingGuard<'_> {
    fn drop(&mut self) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl LoadedClass {
    fn new(class: Arc<dyn Class>, origin: ClassOrigin) -> Self {
        Self {
            class,
            origin,
            init: OnceLock::new(),
            initializing: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &QualifiedName {
        self.class.name()
    }

    pub fn class(&self) -> &Arc<dyn Class> {
        &self.class
    }

    pub fn origin(&self) -> &ClassOrigin {
        &self.origin
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.init.get(), Some(Ok(())))
    }

    /// Run the static initializer if it has not run yet
    ///
    /// A failed initializer is not retried; the class stays erroneous and
    /// every call reports the original failure.
    ///
    /// A request made by the initializer itself, on the thread running it,
    /// returns `Ok` at once and sees the class partially initialized. Other
    /// threads block until the initializer has finished.
    pub fn ensure_initialized(&self) -> Result<(), ClassLoadError> {
        if self.init.get().is_none() && self.is_initializing_here() {
            trace!(
                target: "class_loading::registry",
                class = %self.name(),
                "recursive initialization request"
            );
            return Ok(());
        }
        let outcome = self.init.get_or_init(|| {
            debug!(target: "class_loading::registry", class = %self.name(), "initializing class");
            let _guard = InitializingGuard::enter(&self.initializing);
            self.class.initialize().map_err(|e| format!("{e:#}"))
        });
        outcome
            .clone()
            .map_err(|message| ClassLoadError::Initialization {
                name: self.name().clone(),
                message,
            })
    }

    fn is_initializing_here(&self) -> bool {
        let slot = self.initializing.lock().unwrap_or_else(PoisonError::into_inner);
        *slot == Some(thread::current().id())
    }
}

impl fmt::Debug for LoadedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedClass")
            .field("name", self.name())
            .field("origin", &self.origin)
            .field("init", &self.init.get())
            .finish()
    }
}

#[derive(Default)]
struct RegistryInner {
    classes: HashMap<QualifiedName, Arc<LoadedClass>>,
    order: Vec<QualifiedName>,
}

/// Append-only class table
#[derive(Default)]
pub struct ClassRegistry {
    inner: RwLock<RegistryInner>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Arc<LoadedClass>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.classes.get(name).map(Arc::clone)
    }

    pub fn contains(&self, name: &str) -> bool {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.classes.contains_key(name)
    }

    /// Add a class unless its name is already resident
    ///
    /// Returns the resident entry and whether this call added it.
    pub fn define(&self, class: Arc<dyn Class>, origin: ClassOrigin) -> (Arc<LoadedClass>, bool) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = inner.classes.get(class.name()) {
            trace!(
                target: "class_loading::registry",
                class = %class.name(),
                resident = %existing.origin,
                "class already resident"
            );
            return (Arc::clone(existing), false);
        }

        let name = class.name().clone();
        let loaded = Arc::new(LoadedClass::new(class, origin));
        inner.classes.insert(name.clone(), Arc::clone(&loaded));
        inner.order.push(name);
        (loaded, true)
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resident class names in the order they were defined
    pub fn load_order(&self) -> Vec<QualifiedName> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.order.clone()
    }
}

impl fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassRegistry")
            .field("len", &self.len())
            .finish()
    }
}

/// Global class registry (singleton)
static GLOBAL_CLASS_REGISTRY: OnceLock<Arc<ClassRegistry>> = OnceLock::new();

/// Get the global class registry
pub fn get_global_class_registry() -> Arc<ClassRegistry> {
    Arc::clone(GLOBAL_CLASS_REGISTRY.get_or_init(|| Arc::new(ClassRegistry::new())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use entities_class_model::NativeClass;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn class(name: &str) -> Arc<dyn Class> {
        Arc::new(NativeClass::builder(QualifiedName::parse(name).unwrap()).build())
    }

    #[test]
    fn test_define_is_append_only() {
        let registry = ClassRegistry::new();
        let (first, added) = registry.define(class("a.A"), ClassOrigin::Base);
        assert!(added);

        let (second, added) = registry.define(class("a.A"), ClassOrigin::Archive("x.jar".into()));
        assert!(!added);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.origin(), &ClassOrigin::Base);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_load_order_is_recorded() {
        let registry = ClassRegistry::new();
        for name in ["b.B", "a.A", "b.B", "c.C"] {
            registry.define(class(name), ClassOrigin::Base);
        }
        let order: Vec<String> = registry
            .load_order()
            .into_iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(order, vec!["b.B", "a.A", "c.C"]);
        assert!(registry.contains("a.A"));
        assert!(!registry.contains("z.Z"));
    }

    #[test]
    fn test_initializer_runs_once() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let class = NativeClass::builder(QualifiedName::parse("a.Init").unwrap())
            .initializer(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .build();

        let registry = ClassRegistry::new();
        let (loaded, _) = registry.define(Arc::new(class), ClassOrigin::Base);
        assert!(!loaded.is_initialized());
        loaded.ensure_initialized().unwrap();
        loaded.ensure_initialized().unwrap();
        assert!(loaded.is_initialized());
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_initializer_stays_failed() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let class = NativeClass::builder(QualifiedName::parse("a.Bad").unwrap())
            .initializer(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(anyhow!("static state unavailable"))
            })
            .build();

        let registry = ClassRegistry::new();
        let (loaded, _) = registry.define(Arc::new(class), ClassOrigin::Base);
        for _ in 0..2 {
            match loaded.ensure_initialized() {
                Err(ClassLoadError::Initialization { message, .. }) => {
                    assert_eq!(message, "static state unavailable")
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(!loaded.is_initialized());
    }

    #[test]
    fn test_global_registry_is_shared() {
        let a = get_global_class_registry();
        let b = get_global_class_registry();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_recursive_initialization_returns_early() {
        let registry = Arc::new(ClassRegistry::new());
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let lookup = Arc::downgrade(&registry);
        let class = NativeClass::builder(QualifiedName::parse("a.SelfRef").unwrap())
            .initializer(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                let registry = lookup.upgrade().ok_or_else(|| anyhow!("registry gone"))?;
                let own = registry.get("a.SelfRef").ok_or_else(|| anyhow!("not resident"))?;
                assert!(!own.is_initialized());
                own.ensure_initialized()?;
                Ok(())
            })
            .build();

        let (loaded, _) = registry.define(Arc::new(class), ClassOrigin::Base);
        loaded.ensure_initialized().unwrap();
        assert!(loaded.is_initialized());
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(!loaded.is_initializing_here());
    }
}
