//! Entry Points
//!
//! A loaded class is handed control through a method named `load` taking
//! exactly one parameter: a string list or the placeholder window. The
//! adapters here introspect a class for that method and report a
//! [`ContractViolation`] when it is missing, not static or not public.

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

use code_management_class_loading::LoadedClass;
use entities_class_model::{Argument, MethodDescriptor, MethodId, ParamType, QualifiedName};
use entities_surface::Window;

use crate::error::ContractViolation;

/// Name of the entry-point method
pub const ENTRY_METHOD: &str = "load";

/// How control is handed to the entry class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// `load([string])`, placeholder disposed first
    Arguments,
    /// `load(window)`, placeholder handed over
    Window,
}

impl DispatchMode {
    pub fn param_type(self) -> ParamType {
        match self {
            DispatchMode::Arguments => ParamType::StringList,
            DispatchMode::Window => ParamType::Window,
        }
    }
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchMode::Arguments => f.write_str("arguments"),
            DispatchMode::Window => f.write_str("window"),
        }
    }
}

/// Resolved entry-point method of a class
#[derive(Debug, Clone)]
struct Target {
    class: Arc<LoadedClass>,
    method: MethodId,
}

impl Target {
    fn find(class: &Arc<LoadedClass>, param: ParamType) -> Result<Self, ContractViolation> {
        let methods = class.class().methods();
        let candidates = class.class().find_methods(ENTRY_METHOD);

        let matching: Vec<MethodId> = candidates
            .iter()
            .copied()
            .filter(|id| methods[id.0].accepts(&[param]))
            .collect();

        if let Some(id) = matching
            .iter()
            .copied()
            .find(|id| methods[id.0].is_public() && methods[id.0].is_static())
        {
            return Ok(Self {
                class: Arc::clone(class),
                method: id,
            });
        }

        let name = class.name().clone();
        match matching.first() {
            None => Err(ContractViolation::NoSuchMethod {
                class: name,
                expected: param,
                candidates: candidates
                    .iter()
                    .map(|id| methods[id.0].to_string())
                    .collect(),
            }),
            Some(id) if !methods[id.0].is_public() => Err(ContractViolation::NotAccessible {
                class: name,
                method: methods[id.0].to_string(),
            }),
            Some(id) => Err(ContractViolation::NotStatic {
                class: name,
                method: methods[id.0].to_string(),
            }),
        }
    }

    fn descriptor(&self) -> &MethodDescriptor {
        &self.class.class().methods()[self.method.0]
    }

    fn invoke(&self, argument: Argument) -> anyhow::Result<()> {
        self.class.class().invoke(self.method, argument)
    }
}

/// Entry point taking the program arguments
#[derive(Debug, Clone)]
pub struct ArgsEntryPoint(Target);

impl ArgsEntryPoint {
    pub fn adapt(class: &Arc<LoadedClass>) -> Result<Self, ContractViolation> {
        Target::find(class, ParamType::StringList).map(Self)
    }

    pub fn invoke(&self, args: Vec<String>) -> anyhow::Result<()> {
        self.0.invoke(Argument::Strings(args))
    }
}

/// Entry point taking ownership of the placeholder window
#[derive(Debug, Clone)]
pub struct WindowEntryPoint(Target);

impl WindowEntryPoint {
    pub fn adapt(class: &Arc<LoadedClass>) -> Result<Self, ContractViolation> {
        Target::find(class, ParamType::Window).map(Self)
    }

    pub fn invoke(&self, window: Window) -> anyhow::Result<()> {
        self.0.invoke(Argument::Window(window))
    }
}

/// Entry point capability of a loaded class
#[derive(Debug, Clone)]
pub enum EntryPoint {
    Args(ArgsEntryPoint),
    Window(WindowEntryPoint),
}

impl EntryPoint {
    /// Adapt `class` to the entry point required by `mode`
    pub fn adapt(class: &Arc<LoadedClass>, mode: DispatchMode) -> Result<Self, ContractViolation> {
        match mode {
            DispatchMode::Arguments => ArgsEntryPoint::adapt(class).map(EntryPoint::Args),
            DispatchMode::Window => WindowEntryPoint::adapt(class).map(EntryPoint::Window),
        }
    }

    fn target(&self) -> &Target {
        match self {
            EntryPoint::Args(ArgsEntryPoint(target)) | EntryPoint::Window(WindowEntryPoint(target)) => {
                target
            }
        }
    }

    pub fn class_name(&self) -> &QualifiedName {
        self.target().class.name()
    }

    pub fn descriptor(&self) -> &MethodDescriptor {
        self.target().descriptor()
    }

    pub fn mode(&self) -> DispatchMode {
        match self {
            EntryPoint::Args(_) => DispatchMode::Arguments,
            EntryPoint::Window(_) => DispatchMode::Window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use code_management_class_loading::{
        BaseContext, BuiltinClasses, ClassRegistry, LoadingContext,
    };
    use entities_class_model::{Class, Modifiers, NativeClass};
    use entities_surface::Size;
    use std::sync::Mutex;

    fn load(class: NativeClass) -> Arc<LoadedClass> {
        let name = class.name().clone();
        let builtins = BuiltinClasses::new();
        builtins.register(class);
        let base = BaseContext::new(Arc::new(ClassRegistry::new()), Arc::new(builtins));
        base.load_class(&name).unwrap().class
    }

    fn builder(name: &str) -> entities_class_model::NativeClassBuilder {
        NativeClass::builder(QualifiedName::parse(name).unwrap())
    }

    #[test]
    fn test_args_entry_point() {
        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = Arc::clone(&seen);
        let class = load(
            builder("app.Main")
                .method(
                    MethodDescriptor::public_static(ENTRY_METHOD, [ParamType::Window]),
                    |_| Ok(()),
                )
                .method(
                    MethodDescriptor::public_static(ENTRY_METHOD, [ParamType::StringList]),
                    move |arg| {
                        if let Argument::Strings(args) = arg {
                            *sink.lock().unwrap() = args;
                        }
                        Ok(())
                    },
                )
                .build(),
        );

        let entry = EntryPoint::adapt(&class, DispatchMode::Arguments).unwrap();
        assert_eq!(entry.mode(), DispatchMode::Arguments);
        assert_eq!(entry.descriptor().params, [ParamType::StringList]);
        let EntryPoint::Args(args) = entry else {
            panic!("expected an argument entry point");
        };
        args.invoke(vec!["x".into(), "y".into()]).unwrap();
        assert_eq!(*seen.lock().unwrap(), ["x", "y"]);
    }

    #[test]
    fn test_window_entry_point_receives_window() {
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let class = load(
            builder("app.Gui")
                .method(
                    MethodDescriptor::public_static(ENTRY_METHOD, [ParamType::Window]),
                    move |arg| {
                        if let Argument::Window(window) = arg {
                            *sink.lock().unwrap() = Some(window);
                        }
                        Ok(())
                    },
                )
                .build(),
        );

        let window = Window::new("splash", Size::new(10, 10));
        WindowEntryPoint::adapt(&class)
            .unwrap()
            .invoke(window.clone())
            .unwrap();
        assert!(seen.lock().unwrap().as_ref().unwrap().same_window(&window));
    }

    #[test]
    fn test_missing_entry_point_lists_candidates() {
        let class = load(
            builder("app.Lib")
                .method(
                    MethodDescriptor::public_static(ENTRY_METHOD, [ParamType::StringList]),
                    |_| Ok(()),
                )
                .method(MethodDescriptor::public_static("main", [ParamType::Window]), |_| Ok(()))
                .build(),
        );

        let err = EntryPoint::adapt(&class, DispatchMode::Window).unwrap_err();
        assert_eq!(
            err,
            ContractViolation::NoSuchMethod {
                class: QualifiedName::parse("app.Lib").unwrap(),
                expected: ParamType::Window,
                candidates: vec!["public static load([string])".to_string()],
            }
        );
    }

    #[test]
    fn test_wrong_arity_is_no_such_method() {
        let class = load(
            builder("app.Pair")
                .method(
                    MethodDescriptor::public_static(
                        ENTRY_METHOD,
                        [ParamType::StringList, ParamType::StringList],
                    ),
                    |_| Ok(()),
                )
                .build(),
        );
        assert!(matches!(
            ArgsEntryPoint::adapt(&class),
            Err(ContractViolation::NoSuchMethod { .. })
        ));
    }

    #[test]
    fn test_not_static_and_not_public() {
        let instance = load(
            builder("app.Instance")
                .method(
                    MethodDescriptor::new(ENTRY_METHOD, [ParamType::StringList], Modifiers::PUBLIC),
                    |_| Ok(()),
                )
                .build(),
        );
        assert!(matches!(
            ArgsEntryPoint::adapt(&instance),
            Err(ContractViolation::NotStatic { .. })
        ));

        let hidden = load(
            builder("app.Hidden")
                .method(
                    MethodDescriptor::new(ENTRY_METHOD, [ParamType::StringList], Modifiers::STATIC),
                    |_| Ok(()),
                )
                .build(),
        );
        assert!(matches!(
            ArgsEntryPoint::adapt(&hidden),
            Err(ContractViolation::NotAccessible { .. })
        ));
    }
}
