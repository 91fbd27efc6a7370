//! Program Loader Binary Entry Point
//!
//! `progload <ENTRY> [--class NAME]... [--archive LOCATION]...
//! [--window [--decorated]] [-- ARGS...]`

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

use std::process;

use clap::Parser;
use frameworks_loader_init::{init_logging, run, BootstrapError, EnvConfig, LoaderArgs};
use tracing::debug;

fn main() {
    let args = LoaderArgs::parse();
    init_logging();

    let result = EnvConfig::from_env()
        .map_err(BootstrapError::from)
        .and_then(|env| run(args, &env));

    match result {
        Ok(outcome) => {
            debug!(
                target: "program_loading::dispatch",
                entry = %outcome.entry_class,
                method = %outcome.entry_point,
                "entry point returned"
            );
        }
        Err(e) => {
            let code = e.exit_code();
            eprintln!("progload: {} error: {:#}", e.label(), anyhow::Error::from(e));
            process::exit(code);
        }
    }
}
