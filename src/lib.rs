// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Ataman
//!
//! Compiles a HOCON leader-key config into a tree of mnemonic bindings that
//! a host application walks one key press at a time.
//!
//! # Features
//!
//! - **HOCON subset:** Comments, dotted keys, object merging, unquoted strings
//! - **Deterministic order:** Siblings sorted case-insensitively, lowercase first
//! - **Key chords:** Every mnemonic carries a platform key code and modifiers
//! - **Safe reloads:** A malformed config never replaces a working one
//! - **Host agnostic:** Notifications and file opening go through [`host::Host`]
//!
//! # Architecture
//!
//! - **`core`:** Pure logic (generic tree parser, binding tree builder, key chords)
//! - **`config`:** Rc file, active-config store, reload and watch
//! - **`host`:** The embedding application's services
//! - **`logging`:** Tracing setup for the binary
//!
//! # Examples
//!
//! ## Compiling config text
//!
//! ```
//! use ataman::core::{compile_str, PlatformKeys};
//!
//! let config = compile_str(
//!     "bindings { g { description: Git..., bindings { s { actionId: Status, description: Status } } } }",
//!     &PlatformKeys,
//! )?;
//!
//! let status = config.resolve(&['g', 's']).unwrap();
//! assert_eq!(status.action_id(), Some("Status"));
//! # Ok::<(), ataman::core::BuildError>(())
//! ```
//!
//! ## Reloading the user's rc file
//!
//! ```no_run
//! use ataman::config::{global, reload_config, RcFile};
//! use ataman::host::ConsoleHost;
//!
//! let rc = RcFile::in_home()?;
//! reload_config(&ConsoleHost, &rc, global());
//! println!("Title: {}", global().current().config.title());
//! # Ok::<(), ataman::config::ConfigError>(())
//! ```

pub mod config;
pub mod core;
pub mod host;
pub mod logging;

// Re-export commonly used types for convenience
pub use core::{Config, KeyChord, LeaderBinding, Modifier};
