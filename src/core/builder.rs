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

//! src/core/builder.rs
//!
//! Binding tree builder
//!
//! Walks the `bindings` object of a parsed config and produces the typed
//! `LeaderBinding` tree. Each entry looks like:
//!
//! ```hocon
//! f { actionId: OpenAtamanConfigAction, description: Open config }
//! w { description: Windows..., bindings { ... } }
//! ```
//!
//! # Rules
//! - Only the first character of an entry's key is the mnemonic, so
//!   `f-open` and `f` both bind `f`.
//! - `description` is required. A missing or non-string description fails
//!   the whole build.
//! - `actionId` wins over `bindings`. An entry with neither is dropped and
//!   the rest of the tree is kept.
//! - Siblings are sorted by lowercase mnemonic, lowercase before uppercase
//!   for the same letter. Identical mnemonics keep their source order.

use std::cmp::Ordering;
use thiserror::Error;

use crate::core::keys::KeyChordProvider;
use crate::core::parser::{require_object, require_string, Document, ParseError};
use crate::core::types::{Appearance, Config, GroupBinding, LeaderBinding, SingleBinding};
use crate::core::value::{Object, Value};

const BINDINGS_KEYWORD: &str = "bindings";
const DESCRIPTION_KEYWORD: &str = "description";
const ACTION_ID_KEYWORD: &str = "actionId";
const TITLE_PATH: &str = "appearance.title";

/// Structural errors that make a config unusable
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BuildError {
    #[error(transparent)]
    Tree(#[from] ParseError),

    #[error("Binding key is empty at '{0}'")]
    EmptyKey(String),
}

/// Compile a parsed document into a `Config`
///
/// `appearance.title` falls back to the default title and a missing
/// `bindings` block yields an empty tree.
pub fn compile(document: &Document, keys: &impl KeyChordProvider) -> Result<Config, BuildError> {
    let mut appearance = Appearance::default();
    if document.has_path(TITLE_PATH) {
        appearance.title = Some(document.get_string(TITLE_PATH)?);
    }

    let bindings = if document.has_path(BINDINGS_KEYWORD) {
        let entries = document.get_object(BINDINGS_KEYWORD)?;
        build_bindings_tree(entries, BINDINGS_KEYWORD, keys)?
    } else {
        Vec::new()
    };

    Ok(Config {
        appearance,
        bindings,
    })
}

/// Parse and compile config text in one step.
pub fn compile_str(content: &str, keys: &impl KeyChordProvider) -> Result<Config, BuildError> {
    let document = Document::parse(content)?;
    compile(&document, keys)
}

/// Build one level of the binding tree
///
/// # Arguments
/// * `entries` - The `bindings` object of this level
/// * `path` - Dotted path of `entries`, used in error messages
/// * `keys` - Chord source for each mnemonic
///
/// # Returns
/// Well-formed bindings in display order. Entries with neither `actionId`
/// nor `bindings` are left out.
pub fn build_bindings_tree(
    entries: &Object,
    path: &str,
    keys: &impl KeyChordProvider,
) -> Result<Vec<LeaderBinding>, BuildError> {
    let mut bindings = Vec::with_capacity(entries.len());

    for (keyword, body) in entries.iter() {
        let entry_path = format!("{}.{}", path, keyword);
        if let Some(binding) = build_entry(keyword, body, &entry_path, keys)? {
            bindings.push(binding);
        }
    }

    bindings.sort_by(|a, b| mnemonic_order(a.key(), b.key()));
    Ok(bindings)
}

fn build_entry(
    keyword: &str,
    body: &Value,
    path: &str,
    keys: &impl KeyChordProvider,
) -> Result<Option<LeaderBinding>, BuildError> {
    let key = keyword
        .chars()
        .next()
        .ok_or_else(|| BuildError::EmptyKey(path.to_string()))?;

    let body = require_object(Some(body), path)?;
    let description = require_string(
        body.get(DESCRIPTION_KEYWORD),
        &format!("{}.{}", path, DESCRIPTION_KEYWORD),
    )?;

    if has_value(body, ACTION_ID_KEYWORD) {
        let action_id = require_string(
            body.get(ACTION_ID_KEYWORD),
            &format!("{}.{}", path, ACTION_ID_KEYWORD),
        )?;

        return Ok(Some(LeaderBinding::Single(SingleBinding {
            key,
            key_chord: keys.key_chord(key),
            description,
            action_id,
        })));
    }

    if has_value(body, BINDINGS_KEYWORD) {
        let children_path = format!("{}.{}", path, BINDINGS_KEYWORD);
        let children_object = require_object(body.get(BINDINGS_KEYWORD), &children_path)?;
        let children = build_bindings_tree(children_object, &children_path, keys)?;

        return Ok(Some(LeaderBinding::Group(GroupBinding {
            key,
            key_chord: keys.key_chord(key),
            description,
            children,
        })));
    }

    tracing::debug!(path, "Dropping binding without actionId or bindings");
    Ok(None)
}

/// Present and not null, like `Document::has_path`
fn has_value(body: &Object, key: &str) -> bool {
    body.get(key).is_some_and(|v| !v.is_null())
}

/// Sibling ordering
///
/// Alphabetical by lowercase mnemonic; for the same letter the higher code
/// point comes first, which puts `a` before `A`.
pub fn mnemonic_order(a: char, b: char) -> Ordering {
    fold_case(a)
        .cmp(&fold_case(b))
        .then_with(|| b.cmp(&a))
}

fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
