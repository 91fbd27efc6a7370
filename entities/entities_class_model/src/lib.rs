//! Entities Layer: Class Model
//!
//! Provides the types every loading layer shares:
//! - Qualified class names and their mapping from archive entry paths
//! - Method descriptors, modifiers and invocation arguments
//! - The [`Class`] trait implemented by every loadable class
//! - [`NativeClass`], a class assembled by the host from closures

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

pub mod class;
pub mod method;
pub mod name;
pub mod native_class;

pub use class::Class;
pub use method::{Argument, MethodDescriptor, MethodId, Modifiers, ParamType};
pub use name::{NameError, QualifiedName, CLASS_FILE_SUFFIX};
pub use native_class::{Initializer, MethodBody, NativeClass, NativeClassBuilder};
