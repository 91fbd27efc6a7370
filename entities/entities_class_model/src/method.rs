//! Methods
//!
//! Method descriptors, modifiers, and the arguments an entry point can
//! receive.

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

use bitflags::bitflags;
use entities_surface::Window;

/// Parameter types an entry point can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Ordered sequence of strings
    StringList,
    /// Handle to the placeholder window
    Window,
}

impl ParamType {
    /// Encoding used in class files
    pub const fn code(self) -> u8 {
        match self {
            ParamType::StringList => 0,
            ParamType::Window => 1,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ParamType::StringList),
            1 => Some(ParamType::Window),
            _ => None,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::StringList => f.write_str("[string]"),
            ParamType::Window => f.write_str("window"),
        }
    }
}

bitflags! {
    /// Method modifiers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Callable from outside the declaring class
        const PUBLIC = 1 << 0;
        /// Callable without an instance
        const STATIC = 1 << 1;
    }
}

/// Method signature as seen through introspection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    pub name: String,
    pub params: Vec<ParamType>,
    pub modifiers: Modifiers,
}

impl MethodDescriptor {
    pub fn new(
        name: impl Into<String>,
        params: impl IntoIterator<Item = ParamType>,
        modifiers: Modifiers,
    ) -> Self {
        Self {
            name: name.into(),
            params: params.into_iter().collect(),
            modifiers,
        }
    }

    /// `public static` method with the given parameters
    pub fn public_static(name: impl Into<String>, params: impl IntoIterator<Item = ParamType>) -> Self {
        Self::new(name, params, Modifiers::PUBLIC | Modifiers::STATIC)
    }

    pub fn is_public(&self) -> bool {
        self.modifiers.contains(Modifiers::PUBLIC)
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    /// Whether the parameter list is exactly `params`
    pub fn accepts(&self, params: &[ParamType]) -> bool {
        self.params == params
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_public() {
            f.write_str("public ")?;
        }
        if self.is_static() {
            f.write_str("static ")?;
        }
        write!(f, "{}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")
    }
}

/// Index of a method within [`Class::methods`](crate::Class::methods)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId(pub usize);

/// Value passed to an invoked method
#[derive(Debug, Clone)]
pub enum Argument {
    Strings(Vec<String>),
    Window(Window),
}

impl Argument {
    pub fn param_type(&self) -> ParamType {
        match self {
            Argument::Strings(_) => ParamType::StringList,
            Argument::Window(_) => ParamType::Window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_type_codes() {
        for ty in [ParamType::StringList, ParamType::Window] {
            assert_eq!(ParamType::from_code(ty.code()), Some(ty));
        }
        assert_eq!(ParamType::from_code(7), None);
    }

    #[test]
    fn test_descriptor_display() {
        let load = MethodDescriptor::public_static("load", [ParamType::StringList]);
        assert_eq!(load.to_string(), "public static load([string])");

        let private = MethodDescriptor::new(
            "helper",
            [ParamType::StringList, ParamType::Window],
            Modifiers::empty(),
        );
        assert_eq!(private.to_string(), "helper([string], window)");
    }

    #[test]
    fn test_descriptor_accepts_exact_params() {
        let load = MethodDescriptor::public_static("load", [ParamType::Window]);
        assert!(load.accepts(&[ParamType::Window]));
        assert!(!load.accepts(&[ParamType::StringList]));
        assert!(!load.accepts(&[ParamType::Window, ParamType::Window]));
        assert!(load.is_public() && load.is_static());
    }
}
