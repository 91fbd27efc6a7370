//! Program Loader Errors
//!
//! Every failure of staging or dispatch is returned as a [`LoaderError`]
//! naming the offending class or archive. [`LoaderError::kind`] sorts it
//! into one of five kinds callers can react to.

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

use code_management_class_loading::{ArchiveLoadError, ClassLoadError};
use entities_class_model::{NameError, ParamType, QualifiedName};
use entities_surface::SurfaceError;
use infrastructure_archive::ArchiveError;
use thiserror::Error;

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The plan cannot be dispatched; detected before any I/O
    Configuration,
    /// An archive is missing, unreadable or malformed
    Resource,
    /// A class is not visible through any class source
    Resolution,
    /// The entry class has no usable entry point
    ContractViolation,
    /// Code of a loaded class failed
    Downstream,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Resource => "resource",
            ErrorKind::Resolution => "resolution",
            ErrorKind::ContractViolation => "contract violation",
            ErrorKind::Downstream => "downstream",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("entry class name is empty")]
    EmptyEntryClass,

    #[error("invalid entry class name `{name}`")]
    InvalidEntryClass {
        name: String,
        #[source]
        source: NameError,
    },

    #[error("invalid extra class name `{name}`")]
    InvalidExtraClass {
        name: String,
        #[source]
        source: NameError,
    },

    #[error("entry point of {class} has already been dispatched")]
    AlreadyDispatched { class: QualifiedName },

    #[error("placeholder window is unusable")]
    Surface(#[from] SurfaceError),
}

/// The entry class does not satisfy the entry-point convention
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error(
        "class {class} declares no entry point `load({expected})`{}",
        describe_candidates(.candidates)
    )]
    NoSuchMethod {
        class: QualifiedName,
        expected: ParamType,
        /// Every method of the class named like the entry point
        candidates: Vec<String>,
    },

    #[error("entry point `{method}` of class {class} is not static")]
    NotStatic { class: QualifiedName, method: String },

    #[error("entry point `{method}` of class {class} is not public")]
    NotAccessible { class: QualifiedName, method: String },
}

fn describe_candidates(candidates: &[String]) -> String {
    if candidates.is_empty() {
        String::new()
    } else {
        format!(" (found: {})", candidates.join(", "))
    }
}

/// Why the loader was resolving a class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassRole {
    Extra,
    Entry,
}

impl fmt::Display for ClassRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassRole::Extra => f.write_str("extra"),
            ClassRole::Entry => f.write_str("entry"),
        }
    }
}

/// Program loader errors
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// An archive location failed validation when it was registered
    #[error("cannot register archive")]
    Resource(#[source] ArchiveError),

    /// An archive failed during staging
    #[error("staging failed for archive {}", .0.location())]
    Archive(#[source] ArchiveLoadError),

    /// An extra class or the entry class could not be resolved
    #[error("cannot resolve {role} class {name}")]
    Class {
        role: ClassRole,
        name: QualifiedName,
        #[source]
        source: ClassLoadError,
    },

    #[error(transparent)]
    ContractViolation(#[from] ContractViolation),

    /// The entry point ran and failed
    #[error("entry point of {class} failed")]
    Downstream {
        class: QualifiedName,
        #[source]
        source: anyhow::Error,
    },
}

impl LoaderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoaderError::Configuration(_) => ErrorKind::Configuration,
            LoaderError::Resource(_) => ErrorKind::Resource,
            LoaderError::Archive(ArchiveLoadError::Class {
                source: ClassLoadError::Initialization { .. },
                ..
            }) => ErrorKind::Downstream,
            LoaderError::Archive(_) => ErrorKind::Resource,
            LoaderError::Class {
                source: ClassLoadError::Initialization { .. },
                ..
            } => ErrorKind::Downstream,
            LoaderError::Class { .. } => ErrorKind::Resolution,
            LoaderError::ContractViolation(_) => ErrorKind::ContractViolation,
            LoaderError::Downstream { .. } => ErrorKind::Downstream,
        }
    }

    /// Location of the archive involved, if any
    pub fn archive_location(&self) -> Option<&str> {
        match self {
            LoaderError::Resource(err) => Some(err.location()),
            LoaderError::Archive(err) => Some(err.location()),
            _ => None,
        }
    }

    /// Name of the class involved, if any
    pub fn class_name(&self) -> Option<&QualifiedName> {
        match self {
            LoaderError::Configuration(ConfigurationError::AlreadyDispatched { class }) => {
                Some(class)
            }
            LoaderError::Archive(ArchiveLoadError::Class { class, .. }) => Some(class),
            LoaderError::Class { name, .. } => Some(name),
            LoaderError::ContractViolation(
                ContractViolation::NoSuchMethod { class, .. }
                | ContractViolation::NotStatic { class, .. }
                | ContractViolation::NotAccessible { class, .. },
            ) => Some(class),
            LoaderError::Downstream { class, .. } => Some(class),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> QualifiedName {
        QualifiedName::parse(s).unwrap()
    }

    #[test]
    fn test_kinds() {
        let config = LoaderError::from(ConfigurationError::EmptyEntryClass);
        assert_eq!(config.kind(), ErrorKind::Configuration);

        let resource = LoaderError::Resource(ArchiveError::NotFound {
            location: "missing.jar".into(),
        });
        assert_eq!(resource.kind(), ErrorKind::Resource);
        assert_eq!(resource.archive_location(), Some("missing.jar"));

        let missing = LoaderError::Class {
            role: ClassRole::Extra,
            name: name("a.B"),
            source: ClassLoadError::NotFound { name: name("a.B") },
        };
        assert_eq!(missing.kind(), ErrorKind::Resolution);
        assert_eq!(missing.to_string(), "cannot resolve extra class a.B");

        let init = LoaderError::Class {
            role: ClassRole::Entry,
            name: name("a.B"),
            source: ClassLoadError::Initialization {
                name: name("a.B"),
                message: "boom".into(),
            },
        };
        assert_eq!(init.kind(), ErrorKind::Downstream);

        let downstream = LoaderError::Downstream {
            class: name("a.B"),
            source: anyhow::anyhow!("exit 1"),
        };
        assert_eq!(downstream.kind(), ErrorKind::Downstream);
        assert_eq!(downstream.class_name(), Some(&name("a.B")));
    }

    #[test]
    fn test_archive_initializer_failure_is_downstream() {
        let err = LoaderError::Archive(ArchiveLoadError::Class {
            location: "app.jar".into(),
            class: name("app.Init"),
            source: ClassLoadError::Initialization {
                name: name("app.Init"),
                message: "static init".into(),
            },
        });
        assert_eq!(err.kind(), ErrorKind::Downstream);
        assert_eq!(err.archive_location(), Some("app.jar"));
        assert_eq!(err.to_string(), "staging failed for archive app.jar");

        let malformed = LoaderError::Archive(ArchiveLoadError::Archive(ArchiveError::Malformed {
            location: "app.jar".into(),
            reason: "no directory".into(),
        }));
        assert_eq!(malformed.kind(), ErrorKind::Resource);
    }

    #[test]
    fn test_no_such_method_lists_candidates() {
        let none = ContractViolation::NoSuchMethod {
            class: name("app.Main"),
            expected: ParamType::StringList,
            candidates: Vec::new(),
        };
        assert_eq!(
            none.to_string(),
            "class app.Main declares no entry point `load([string])`"
        );

        let some = ContractViolation::NoSuchMethod {
            class: name("app.Main"),
            expected: ParamType::Window,
            candidates: vec!["public static load([string])".into()],
        };
        assert_eq!(
            some.to_string(),
            "class app.Main declares no entry point `load(window)` (found: public static load([string]))"
        );
    }
}
