//! Native Symbol Table
//!
//! Provides a table of host functions that class files bind to by symbol.
//! A class file declares its methods and names the native symbol behind
//! each one; linking looks those symbols up here.

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

use entities_class_model::{Argument, Initializer, MethodBody};

/// Native symbol table
///
/// Thread-safe table of method bodies and initializers keyed by symbol.
/// Registration never replaces an existing symbol.
#[derive(Default)]
pub struct NativeTable {
    methods: RwLock<HashMap<String, MethodBody>>,
    initializers: RwLock<HashMap<String, Initializer>>,
}

impl NativeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method body
    ///
    /// # Returns
    /// `false` if the symbol was already registered
    pub fn register_method<F>(&self, symbol: impl Into<String>, body: F) -> bool
    where
        F: Fn(Argument) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let mut methods = self.methods.write().unwrap_or_else(PoisonError::into_inner);
        let symbol = symbol.into();
        if methods.contains_key(&symbol) {
            return false;
        }
        methods.insert(symbol, Arc::new(body));
        true
    }

    /// Register a static initializer
    ///
    /// # Returns
    /// `false` if the symbol was already registered
    pub fn register_initializer<F>(&self, symbol: impl Into<String>, init: F) -> bool
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let mut initializers = self
            .initializers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let symbol = symbol.into();
        if initializers.contains_key(&symbol) {
            return false;
        }
        initializers.insert(symbol, Arc::new(init));
        true
    }

    pub fn method(&self, symbol: &str) -> Option<MethodBody> {
        let methods = self.methods.read().unwrap_or_else(PoisonError::into_inner);
        methods.get(symbol).map(Arc::clone)
    }

    pub fn initializer(&self, symbol: &str) -> Option<Initializer> {
        let initializers = self
            .initializers
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        initializers.get(symbol).map(Arc::clone)
    }
}

impl fmt::Debug for NativeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let methods = self.methods.read().unwrap_or_else(PoisonError::into_inner);
        let initializers = self
            .initializers
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("NativeTable")
            .field("methods", &methods.len())
            .field("initializers", &initializers.len())
            .finish()
    }
}

/// Global native symbol table (singleton)
static GLOBAL_NATIVES: OnceLock<Arc<NativeTable>> = OnceLock::new();

/// Get the global native symbol table
pub fn get_global_natives() -> Arc<NativeTable> {
    Arc::clone(GLOBAL_NATIVES.get_or_init(|| Arc::new(NativeTable::new())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let table = NativeTable::new();
        assert!(table.register_method("echo", |_| Ok(())));
        assert!(table.register_initializer("clinit", || Ok(())));

        assert!(table.method("echo").is_some());
        assert!(table.initializer("clinit").is_some());
        assert!(table.method("clinit").is_none());
        assert!(table.initializer("echo").is_none());
    }

    #[test]
    fn test_first_registration_wins() {
        let table = NativeTable::new();
        assert!(table.register_method("run", |_| Ok(())));
        assert!(!table.register_method("run", |_| anyhow::bail!("replacement")));

        let body = table.method("run").unwrap();
        assert!(body(Argument::Strings(Vec::new())).is_ok());
    }

    #[test]
    fn test_global_table_is_shared() {
        let a = get_global_natives();
        let b = get_global_natives();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
