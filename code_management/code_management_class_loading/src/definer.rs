//! Class Definition
//!
//! Turns the bytes of a class file into a loadable class. The default
//! definer parses the file, checks the declared name and links every
//! method against the native symbol table.

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

use std::sync::Arc;

use entities_class_model::{Class, NativeClass, QualifiedName};

use crate::class_file::ClassFile;
use crate::error::DefinitionError;
use crate::natives::NativeTable;

/// Defines classes from class file bytes
pub trait ClassDefiner: Send + Sync {
    fn define(&self, name: &QualifiedName, bytes: &[u8]) -> Result<Arc<dyn Class>, DefinitionError>;
}

/// Definer that links class files against a [`NativeTable`]
#[derive(Debug, Clone)]
pub struct LinkingDefiner {
    natives: Arc<NativeTable>,
}

impl LinkingDefiner {
    pub fn new(natives: Arc<NativeTable>) -> Self {
        Self { natives }
    }

    pub fn natives(&self) -> &Arc<NativeTable> {
        &self.natives
    }
}

impl ClassDefiner for LinkingDefiner {
    fn define(&self, name: &QualifiedName, bytes: &[u8]) -> Result<Arc<dyn Class>, DefinitionError> {
        let file = ClassFile::parse(bytes)?;
        if file.name != name.as_str() {
            return Err(DefinitionError::NameMismatch {
                expected: name.clone(),
                found: file.name,
            });
        }

        let unresolved = |symbol: &str| DefinitionError::UnresolvedNative {
            class: name.clone(),
            symbol: symbol.to_string(),
        };

        let mut builder = NativeClass::builder(name.clone());
        for entry in file.methods {
            let body = self
                .natives
                .method(&entry.symbol)
                .ok_or_else(|| unresolved(&entry.symbol))?;
            builder = builder.method_body(entry.descriptor, body);
        }
        if let Some(symbol) = &file.initializer {
            let init = self
                .natives
                .initializer(symbol)
                .ok_or_else(|| unresolved(symbol))?;
            builder = builder.initializer_body(init);
        }

        Ok(Arc::new(builder.build()))
    }
}
