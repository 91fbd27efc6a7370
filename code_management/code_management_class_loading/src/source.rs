//! Class Sources
//!
//! A class source finds classes by name. The base source of a loader is
//! the table of builtin classes registered by the host.

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
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use entities_class_model::{Class, QualifiedName};

use crate::error::DefinitionError;

/// Finds classes by name
pub trait ClassSource: Send + Sync {
    /// Look up a class
    ///
    /// # Returns
    /// * `Ok(None)` - This source does not hold the class
    /// * `Err(_)` - The class is present but cannot be defined
    fn find_class(&self, name: &QualifiedName) -> Result<Option<Arc<dyn Class>>, DefinitionError>;
}

/// Builtin classes registered by the host
#[derive(Default)]
pub struct BuiltinClasses {
    classes: RwLock<HashMap<QualifiedName, Arc<dyn Class>>>,
}

impl BuiltinClasses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class
    ///
    /// # Returns
    /// `false` if a class with the same name was already registered
    pub fn register(&self, class: impl Class + 'static) -> bool {
        self.register_arc(Arc::new(class))
    }

    pub fn register_arc(&self, class: Arc<dyn Class>) -> bool {
        let mut classes = self.classes.write().unwrap_or_else(PoisonError::into_inner);
        if classes.contains_key(class.name()) {
            return false;
        }
        classes.insert(class.name().clone(), class);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        let classes = self.classes.read().unwrap_or_else(PoisonError::into_inner);
        classes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        let classes = self.classes.read().unwrap_or_else(PoisonError::into_inner);
        classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ClassSource for BuiltinClasses {
    fn find_class(&self, name: &QualifiedName) -> Result<Option<Arc<dyn Class>>, DefinitionError> {
        let classes = self.classes.read().unwrap_or_else(PoisonError::into_inner);
        Ok(classes.get(name).map(Arc::clone))
    }
}

impl fmt::Debug for BuiltinClasses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinClasses")
            .field("len", &self.len())
            .finish()
    }
}

/// Global builtin class table (singleton)
static GLOBAL_BUILTIN_CLASSES: OnceLock<Arc<BuiltinClasses>> = OnceLock::new();

/// Get the global builtin class table
pub fn get_global_builtin_classes() -> Arc<BuiltinClasses> {
    Arc::clone(GLOBAL_BUILTIN_CLASSES.get_or_init(|| Arc::new(BuiltinClasses::new())))
}
