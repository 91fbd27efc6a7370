//! Native Classes
//!
//! Classes assembled by the host out of closures. Builtin classes and
//! classes linked from archive class files are both `NativeClass` values.

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

use anyhow::{anyhow, bail};

use crate::class::Class;
use crate::method::{Argument, MethodDescriptor, MethodId};
use crate::name::QualifiedName;

/// Body of a native method
pub type MethodBody = Arc<dyn Fn(Argument) -> anyhow::Result<()> + Send + Sync>;

/// Body of a native static initializer
pub type Initializer = Arc<dyn Fn() -> anyhow::Result<()> + Send + Sync>;

/// Host-built class
pub struct NativeClass {
    name: QualifiedName,
    descriptors: Vec<MethodDescriptor>,
    bodies: Vec<MethodBody>,
    initializer: Option<Initializer>,
}

impl NativeClass {
    pub fn builder(name: QualifiedName) -> NativeClassBuilder {
        NativeClassBuilder {
            name,
            descriptors: Vec::new(),
            bodies: Vec::new(),
            initializer: None,
        }
    }

    pub fn has_initializer(&self) -> bool {
        self.initializer.is_some()
    }
}

impl Class for NativeClass {
    fn name(&self) -> &QualifiedName {
        &self.name
    }

    fn methods(&self) -> &[MethodDescriptor] {
        &self.descriptors
    }

    fn initialize(&self) -> anyhow::Result<()> {
        match &self.initializer {
            Some(init) => init(),
            None => Ok(()),
        }
    }

    fn invoke(&self, method: MethodId, argument: Argument) -> anyhow::Result<()> {
        let descriptor = self
            .descriptors
            .get(method.0)
            .ok_or_else(|| anyhow!("{}: no method at index {}", self.name, method.0))?;
        if !descriptor.accepts(&[argument.param_type()]) {
            bail!(
                "{}: {} cannot be invoked with a {} argument",
                self.name,
                descriptor,
                argument.param_type()
            );
        }
        (self.bodies[method.0])(argument)
    }
}

impl fmt::Debug for NativeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeClass")
            .field("name", &self.name)
            .field("methods", &self.descriptors)
            .field("has_initializer", &self.initializer.is_some())
            .finish()
    }
}

/// Builder for [`NativeClass`]
pub struct NativeClassBuilder {
    name: QualifiedName,
    descriptors: Vec<MethodDescriptor>,
    bodies: Vec<MethodBody>,
    initializer: Option<Initializer>,
}

impl NativeClassBuilder {
    pub fn method<F>(self, descriptor: MethodDescriptor, body: F) -> Self
    where
        F: Fn(Argument) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.method_body(descriptor, Arc::new(body))
    }

    pub fn method_body(mut self, descriptor: MethodDescriptor, body: MethodBody) -> Self {
        self.descriptors.push(descriptor);
        self.bodies.push(body);
        self
    }

    pub fn initializer<F>(self, init: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.initializer_body(Arc::new(init))
    }

    pub fn initializer_body(mut self, init: Initializer) -> Self {
        self.initializer = Some(init);
        self
    }

    pub fn build(self) -> NativeClass {
        NativeClass {
            name: self.name,
            descriptors: self.descriptors,
            bodies: self.bodies,
            initializer: self.initializer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::ParamType;
    use std::sync::Mutex;

    fn name(s: &str) -> QualifiedName {
        QualifiedName::parse(s).unwrap()
    }

    #[test]
    fn test_invoke_passes_arguments() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let class = NativeClass::builder(name("demo.Main"))
            .method(
                MethodDescriptor::public_static("load", [ParamType::StringList]),
                move |arg| {
                    if let Argument::Strings(args) = arg {
                        sink.lock().unwrap().extend(args);
                    }
                    Ok(())
                },
            )
            .build();

        let ids = class.find_methods("load");
        assert_eq!(ids, vec![MethodId(0)]);
        class
            .invoke(ids[0], Argument::Strings(vec!["x".into(), "y".into()]))
            .unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_invoke_rejects_mismatched_argument() {
        let class = NativeClass::builder(name("demo.Main"))
            .method(
                MethodDescriptor::public_static("load", [ParamType::StringList]),
                |_| Ok(()),
            )
            .build();
        let window = entities_surface::Window::new("w", entities_surface::Size::new(1, 1));
        assert!(class.invoke(MethodId(0), Argument::Window(window)).is_err());
        assert!(class.invoke(MethodId(3), Argument::Strings(vec![])).is_err());
    }

    #[test]
    fn test_initializer() {
        let plain = NativeClass::builder(name("demo.Plain")).build();
        assert!(!plain.has_initializer());
        assert!(plain.initialize().is_ok());

        let failing = NativeClass::builder(name("demo.Failing"))
            .initializer(|| Err(anyhow!("boom")))
            .build();
        assert!(failing.has_initializer());
        assert_eq!(failing.initialize().unwrap_err().to_string(), "boom");
    }

    #[test]
    fn test_trait_object_debug() {
        let class: Arc<dyn Class> = Arc::new(
            NativeClass::builder(name("demo.Main"))
                .method(
                    MethodDescriptor::public_static("load", [ParamType::StringList]),
                    |_| Ok(()),
                )
                .build(),
        );
        let shown = format!("{:?}", class);
        assert!(shown.starts_with("Class"));
        assert!(shown.contains("demo.Main"));
        assert!(shown.contains("load"));
    }
}
