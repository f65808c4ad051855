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

//! src/core/mod.rs
//!
//! Core business logic module
//!
//! This module contains the fundamental data structures and algorithms
//! for compiling a leader-key config, including:
//! - Generic config tree (`Value`, `Object`) and its HOCON parser
//! - Type definitions for bindings and key chords
//! - Key chord synthesis for mnemonic characters
//! - The binding tree builder
//! - Duplicate mnemonic detection
//!
//! Everything here is pure: no file access, no shared state. That lives in
//! `config`, which keeps this module testable on plain strings.

pub mod builder;
pub mod conflict;
pub mod keys;
pub mod parser;
pub mod types;
pub mod value;

pub use builder::{build_bindings_tree, compile, compile_str, mnemonic_order, BuildError};
pub use conflict::{Conflict, ConflictDetector};
pub use keys::{synthesize, KeyChordProvider, PlatformKeys};
pub use parser::{Document, ParseError};
pub use types::*;
pub use value::{Object, Value};

#[cfg(test)]
mod tests;
