//! Class Trait
//!
//! The introspection surface every loadable class exposes.

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

use crate::method::{Argument, MethodDescriptor, MethodId};
use crate::name::QualifiedName;

/// A loadable class
///
/// Classes are resolved by name, introspected through [`methods`] and
/// invoked by method index. Failures raised by the class's own code
/// (initializer or method body) are opaque to the loader.
///
/// [`methods`]: Class::methods
pub trait Class: Send + Sync {
    fn name(&self) -> &QualifiedName;

    /// Declared methods, in declaration order
    fn methods(&self) -> &[MethodDescriptor];

    /// Static initializer; runs at most once per loaded class
    fn initialize(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn invoke(&self, method: MethodId, argument: Argument) -> anyhow::Result<()>;

    /// Indices of every method with the given name
    fn find_methods(&self, name: &str) -> Vec<MethodId> {
        self.methods()
            .iter()
            .enumerate()
            .filter(|(_, m)| m.name == name)
            .map(|(i, _)| MethodId(i))
            .collect()
    }
}

impl fmt::Debug for dyn Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", self.name())
            .field("methods", &self.methods())
            .finish()
    }
}
