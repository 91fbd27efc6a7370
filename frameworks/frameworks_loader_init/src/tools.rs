//! Builtin Tools
//!
//! Classes shipped with the bootstrap. `progload.tools.Echo` prints its
//! arguments, or the title and size of the window it is handed. The same
//! bodies are registered as natives so archive classes can bind to them.

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

use std::sync::Arc;

use code_management_class_loading::{BuiltinClasses, NativeTable};
use entities_class_model::{Argument, MethodBody, MethodDescriptor, NativeClass, ParamType, QualifiedName};
use tracing::debug;

pub const ECHO_CLASS: &str = "progload.tools.Echo";

/// Native symbol printing a string list
pub const ECHO_ARGS_SYMBOL: &str = "progload_echo_args";

/// Native symbol describing a window
pub const ECHO_WINDOW_SYMBOL: &str = "progload_echo_window";

/// Echo body writing each line through `sink`
fn echo_body(sink: Arc<dyn Fn(String) + Send + Sync>) -> MethodBody {
    Arc::new(move |argument| {
        let line = match argument {
            Argument::Strings(args) => args.join(" "),
            Argument::Window(window) => format!(
                "{} {} decorated={}",
                window.title(),
                window.size(),
                window.is_decorated()
            ),
        };
        sink(line);
        Ok(())
    })
}

/// Build the echo class around `sink`
pub fn echo_class(sink: impl Fn(String) + Send + Sync + 'static) -> anyhow::Result<NativeClass> {
    let body = echo_body(Arc::new(sink));
    Ok(NativeClass::builder(QualifiedName::parse(ECHO_CLASS)?)
        .method_body(
            MethodDescriptor::public_static("load", [ParamType::StringList]),
            Arc::clone(&body),
        )
        .method_body(
            MethodDescriptor::public_static("load", [ParamType::Window]),
            body,
        )
        .build())
}

/// Register the builtin tool classes and their natives
///
/// Safe to call more than once; existing registrations are kept.
pub fn register_builtin_tools(builtins: &BuiltinClasses, natives: &NativeTable) -> anyhow::Result<()> {
    let registered = builtins.register(echo_class(|line| println!("{line}"))?);
    let stdout = echo_body(Arc::new(|line: String| println!("{line}")));
    let args_body = Arc::clone(&stdout);
    natives.register_method(ECHO_ARGS_SYMBOL, move |argument| args_body(argument));
    natives.register_method(ECHO_WINDOW_SYMBOL, move |argument| stdout(argument));
    debug!(target: "program_loading::stage", registered, "builtin tools ready");
    Ok(())
}
