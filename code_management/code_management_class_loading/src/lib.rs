//! Code Management Layer: Class Loading
//!
//! Provides class loading and class registry functionality:
//! - Global append-only class registry with once-only initialization
//! - Base and isolated loading contexts with parent-first delegation
//! - Class file parsing and linking against host natives
//! - Staging every class of an archive through an isolated context
//!
//! Depends on the Entities and Infrastructure layers.

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

pub mod archive_source;
pub mod class_file;
pub mod context;
pub mod definer;
pub mod error;
pub mod natives;
pub mod registry;
pub mod runtime;
pub mod source;

pub use archive_source::{ArchiveClassSource, ArchiveLoadError, ArchivePolicy, ArchiveReport};
pub use class_file::{ClassFile, ClassFileError, MethodEntry};
pub use context::{BaseContext, IsolatedContext, LoadingContext, Resolution};
pub use definer::{ClassDefiner, LinkingDefiner};
pub use error::{ClassLoadError, DefinitionError};
pub use natives::{get_global_natives, NativeTable};
pub use registry::{get_global_class_registry, ClassOrigin, ClassRegistry, LoadedClass};
pub use runtime::ClassRuntime;
pub use source::{get_global_builtin_classes, BuiltinClasses, ClassSource};
