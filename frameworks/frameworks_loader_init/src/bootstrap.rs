//! Bootstrap
//!
//! Merges the command line, the environment and the defaults into a
//! loader configuration, then drives a program loader through the
//! requested dispatch mode. Command-line settings win over the
//! environment.

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

use code_management_class_loading::{get_global_builtin_classes, get_global_natives, ClassRuntime};
use thiserror::Error;
use tracing::info;
use usecases_program_loading::{
    DispatchMode, DispatchOutcome, ErrorKind, LoaderConfig, LoaderError, ProgramLoader,
};

use crate::args::LoaderArgs;
use crate::env::{EnvConfig, EnvError};
use crate::tools::register_builtin_tools;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("invalid environment")]
    Environment(#[from] EnvError),

    #[error("cannot register builtin tools")]
    Tools(#[source] anyhow::Error),

    #[error(transparent)]
    Loader(#[from] LoaderError),
}

impl BootstrapError {
    /// Short label for the failure, the loader error kind where there is one
    pub fn label(&self) -> String {
        match self {
            BootstrapError::Environment(_) | BootstrapError::Tools(_) => {
                ErrorKind::Configuration.to_string()
            }
            BootstrapError::Loader(err) => err.kind().to_string(),
        }
    }

    /// Process exit status for this failure
    pub fn exit_code(&self) -> i32 {
        let kind = match self {
            BootstrapError::Environment(_) | BootstrapError::Tools(_) => ErrorKind::Configuration,
            BootstrapError::Loader(err) => err.kind(),
        };
        match kind {
            ErrorKind::Configuration => 2,
            ErrorKind::Resource => 3,
            ErrorKind::Resolution => 4,
            ErrorKind::ContractViolation => 5,
            ErrorKind::Downstream => 6,
        }
    }
}

/// Loader configuration from the command line, the environment and defaults
pub fn loader_config(args: &LoaderArgs, env: &EnvConfig) -> LoaderConfig {
    let defaults = LoaderConfig::default();
    LoaderConfig {
        display: args.display.or(env.display).unwrap_or(defaults.display),
        archive_policy: args
            .archive_policy
            .map(Into::into)
            .or(env.archive_policy)
            .unwrap_or(defaults.archive_policy),
        ..defaults
    }
}

/// Run against the global class runtime with the builtin tools registered
pub fn run(args: LoaderArgs, env: &EnvConfig) -> Result<DispatchOutcome, BootstrapError> {
    register_builtin_tools(&get_global_builtin_classes(), &get_global_natives())
        .map_err(BootstrapError::Tools)?;
    run_with_runtime(args, env, ClassRuntime::global())
}

pub fn run_with_runtime(
    args: LoaderArgs,
    env: &EnvConfig,
    runtime: ClassRuntime,
) -> Result<DispatchOutcome, BootstrapError> {
    let config = loader_config(&args, env);
    info!(
        target: "program_loading::dispatch",
        entry = %args.entry,
        mode = %args.dispatch_mode(),
        display = %config.display,
        policy = ?config.archive_policy,
        "bootstrapping"
    );

    let mut loader = ProgramLoader::with_runtime(args.entry.as_str(), runtime, config);
    loader
        .add_extra_classes(args.classes.iter().cloned())
        .add_archives(&args.archives)?;

    let outcome = match args.dispatch_mode() {
        DispatchMode::Arguments => loader.run_with_arguments(args.args)?,
        DispatchMode::Window => loader.run_in_window(args.decorated)?,
    };
    Ok(outcome)
}
