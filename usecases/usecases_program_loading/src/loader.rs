//! Program Loader
//!
//! Stages a load plan into the class registry and hands control to the
//! entry class.
//!
//! ## Staging
//!
//! Extra classes are resolved and initialized through the base context in
//! insertion order, then every archive is staged in insertion order. The
//! first failure stops staging; classes already loaded stay loaded.
//!
//! ## Dispatch
//!
//! - [`ProgramLoader::run_with_arguments`] shows the placeholder window,
//!   stages, resolves the entry point, disposes the window and invokes
//!   `load([string])`.
//! - [`ProgramLoader::run_in_window`] does the same but hands the still
//!   open window to `load(window)` instead of disposing it.
//!
//! When dispatch fails before the entry point runs, the window stays up
//! and the plan is left intact so the caller can correct it and retry.
//! Once control is handed to the entry point the plan's archive handles
//! are closed.

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

use code_management_class_loading::{
    ArchiveReport, ClassRuntime, LoadingContext, Resolution,
};
use entities_class_model::{MethodDescriptor, QualifiedName};
use entities_surface::Window;
use infrastructure_archive::{ArchiveHandle, ArchiveLocation};
use tracing::{debug, info, warn};

use crate::config::LoaderConfig;
use crate::entry_point::{DispatchMode, EntryPoint};
use crate::error::{ClassRole, ConfigurationError, LoaderError};
use crate::plan::LoadPlan;

/// Classes resolved by one staging pass
#[derive(Debug, Default)]
pub struct StagingReport {
    pub extra_classes: Vec<Resolution>,
    pub archives: Vec<ArchiveReport>,
}

impl StagingReport {
    /// Every resolved class in staging order
    pub fn load_order(&self) -> Vec<&QualifiedName> {
        self.extra_classes
            .iter()
            .chain(self.archives.iter().flat_map(|a| a.classes.iter()))
            .map(|r| r.class.name())
            .collect()
    }

    /// Number of classes this pass added to the registry
    pub fn newly_defined(&self) -> usize {
        self.extra_classes
            .iter()
            .chain(self.archives.iter().flat_map(|a| a.classes.iter()))
            .filter(|r| r.newly_defined)
            .count()
    }
}

/// Result of a dispatch whose entry point returned normally
#[derive(Debug)]
pub struct DispatchOutcome {
    pub entry_class: QualifiedName,
    pub entry_point: MethodDescriptor,
    pub mode: DispatchMode,
    pub staging: StagingReport,
}

enum DispatchRequest {
    Arguments(Vec<String>),
    Window { decorated: bool },
}

impl DispatchRequest {
    fn mode(&self) -> DispatchMode {
        match self {
            DispatchRequest::Arguments(_) => DispatchMode::Arguments,
            DispatchRequest::Window { .. } => DispatchMode::Window,
        }
    }
}

/// Dynamic program loader
#[derive(Debug)]
pub struct ProgramLoader {
    plan: LoadPlan,
    runtime: ClassRuntime,
    config: LoaderConfig,
    window: Window,
    dispatched: bool,
}

impl ProgramLoader {
    /// Loader over the global class runtime with the default configuration
    pub fn new(entry_class: impl Into<String>) -> Self {
        Self::with_runtime(entry_class, ClassRuntime::global(), LoaderConfig::default())
    }

    pub fn with_runtime(
        entry_class: impl Into<String>,
        runtime: ClassRuntime,
        config: LoaderConfig,
    ) -> Self {
        let window = Window::new(config.splash.title.clone(), config.splash.size());
        window.center_on(&config.display);
        Self {
            plan: LoadPlan::new(entry_class),
            runtime,
            config,
            window,
            dispatched: false,
        }
    }

    pub fn plan(&self) -> &LoadPlan {
        &self.plan
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn runtime(&self) -> &ClassRuntime {
        &self.runtime
    }

    /// Placeholder window
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Queue classes to resolve and initialize before the archives
    pub fn add_extra_classes<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plan.push_extra_classes(names);
        self
    }

    /// Open and queue archives
    ///
    /// Every location is opened and validated now. If any fails, none of
    /// them is added.
    pub fn add_archives<I, S>(&mut self, locations: I) -> Result<&mut Self, LoaderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let handles = locations
            .into_iter()
            .map(|location| ArchiveLocation::parse(location.as_ref()).and_then(ArchiveHandle::open))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| {
                warn!(
                    target: "program_loading::stage",
                    archive = err.location(),
                    error = %err,
                    "archive rejected"
                );
                LoaderError::Resource(err)
            })?;
        self.plan.push_archives(handles);
        Ok(self)
    }

    /// Stage the plan without dispatching
    pub fn stage(&self) -> Result<StagingReport, LoaderError> {
        let extra_names = self.plan.extra_names()?;
        info!(
            target: "program_loading::stage",
            extra_classes = extra_names.len(),
            archives = self.plan.archives().len(),
            "staging"
        );

        let base = self.runtime.base_context();
        let mut report = StagingReport::default();
        for name in extra_names {
            let resolution = base
                .resolve_and_initialize(&name)
                .map_err(|source| LoaderError::Class {
                    role: ClassRole::Extra,
                    name: name.clone(),
                    source,
                })?;
            debug!(
                target: "program_loading::stage",
                class = %name,
                newly_defined = resolution.newly_defined,
                "extra class ready"
            );
            report.extra_classes.push(resolution);
        }

        for handle in self.plan.archives() {
            let handle = handle.duplicate().map_err(LoaderError::Resource)?;
            let archive = self
                .runtime
                .stage_archive(handle, self.config.archive_policy)
                .map_err(LoaderError::Archive)?;
            report.archives.push(archive);
        }

        info!(
            target: "program_loading::stage",
            classes = report.load_order().len(),
            newly_defined = report.newly_defined(),
            "staging complete"
        );
        Ok(report)
    }

    /// Stage, dispose the placeholder window and invoke `load([string])`
    pub fn run_with_arguments<I, S>(&mut self, args: I) -> Result<DispatchOutcome, LoaderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = args.into_iter().map(Into::into).collect();
        self.dispatch(DispatchRequest::Arguments(args))
    }

    /// Stage and hand the placeholder window to `load(window)`
    ///
    /// The window is shown with the requested decoration and is not
    /// disposed; the entry point owns it from then on.
    pub fn run_in_window(&mut self, decorated: bool) -> Result<DispatchOutcome, LoaderError> {
        self.dispatch(DispatchRequest::Window { decorated })
    }

    fn dispatch(&mut self, request: DispatchRequest) -> Result<DispatchOutcome, LoaderError> {
        let mode = request.mode();
        let result = self.try_dispatch(request);
        if let Err(err) = &result {
            warn!(
                target: "program_loading::dispatch",
                entry = self.plan.entry_class(),
                %mode,
                kind = %err.kind(),
                error = %err,
                "dispatch failed"
            );
        }
        result
    }

    fn try_dispatch(&mut self, request: DispatchRequest) -> Result<DispatchOutcome, LoaderError> {
        let entry = self.plan.entry_name()?;
        if self.dispatched {
            return Err(ConfigurationError::AlreadyDispatched { class: entry }.into());
        }
        self.plan.extra_names()?;

        let (mode, args) = match request {
            DispatchRequest::Arguments(args) => {
                self.window.show().map_err(ConfigurationError::from)?;
                (DispatchMode::Arguments, args)
            }
            DispatchRequest::Window { decorated } => {
                self.window.hide();
                self.window
                    .set_decorated(decorated)
                    .map_err(ConfigurationError::from)?;
                self.window.show().map_err(ConfigurationError::from)?;
                (DispatchMode::Window, Vec::new())
            }
        };

        let staging = self.stage()?;

        let resolution = self
            .runtime
            .base_context()
            .resolve_and_initialize(&entry)
            .map_err(|source| LoaderError::Class {
                role: ClassRole::Entry,
                name: entry.clone(),
                source,
            })?;
        let entry_point = EntryPoint::adapt(&resolution.class, mode)?;
        let descriptor = entry_point.descriptor().clone();

        info!(
            target: "program_loading::dispatch",
            entry = %entry,
            method = %descriptor,
            "handing control to entry point"
        );
        self.dispatched = true;
        let released = self.plan.release_archives();
        debug!(
            target: "program_loading::dispatch",
            archives = released,
            "archive handles closed"
        );
        let invoked = match entry_point {
            EntryPoint::Args(entry_point) => {
                self.window.dispose();
                entry_point.invoke(args)
            }
            EntryPoint::Window(entry_point) => entry_point.invoke(self.window.clone()),
        };
        invoked.map_err(|source| LoaderError::Downstream {
            class: entry.clone(),
            source,
        })?;

        Ok(DispatchOutcome {
            entry_class: entry,
            entry_point: descriptor,
            mode,
            staging,
        })
    }
}
