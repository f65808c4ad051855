//! src/core/types.rs
//!
//! Core type definitions for the leader-key binding tree
//!
//! This module defines the fundamental types used throughout the application:
//! - `Modifier`: Keyboard modifier flags carried by a key chord
//! - `KeyCode`: Platform virtual key code
//! - `KeyChord`: A key code plus modifiers, derived from a mnemonic character
//! - `LeaderBinding`: A node of the binding tree (single action or group)
//! - `Config`: The compiled configuration (appearance + root bindings)
//!
//! All types implement serialisation so the compiled tree can be dumped as
//! JSON, and equality so reloads can be compared.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default title shown above the leader popup.
pub const DEFAULT_TITLE: &str = "Ataman";

/// Keyboard modifier keys
///
/// Only `Shift` is ever produced by the synthesiser today; the remaining
/// variants exist so chords can be compared against host key events.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Modifier {
    /// Super/Windows/Command key (META)
    Super,
    /// Control key
    Ctrl,
    /// Shift key
    Shift,
    /// Alt key
    Alt,
}

impl Modifier {
    /// Extended modifier mask bit for this modifier (AWT `*_DOWN_MASK` values).
    pub fn mask(self) -> u32 {
        match self {
            Modifier::Shift => 1 << 6,
            Modifier::Ctrl => 1 << 7,
            Modifier::Super => 1 << 8,
            Modifier::Alt => 1 << 9,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Super => write!(f, "SUPER"),
            Modifier::Ctrl => write!(f, "CTRL"),
            Modifier::Shift => write!(f, "SHIFT"),
            Modifier::Alt => write!(f, "ALT"),
        }
    }
}

/// Platform virtual key code.
///
/// Values follow the AWT virtual key table: `VK_A..VK_Z` are `0x41..0x5A`,
/// digits are `0x30..0x39`, and characters without a dedicated code use the
/// extended range `0x0100_0000 + code point`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct KeyCode(pub u32);

impl KeyCode {
    /// Code returned when a character has no representation.
    pub const UNDEFINED: KeyCode = KeyCode(0);

    /// Base of the extended (unicode) key code range.
    pub const EXTENDED_BASE: u32 = 0x0100_0000;

    /// True if this code lives in the extended unicode range.
    pub fn is_extended(self) -> bool {
        self.0 >= Self::EXTENDED_BASE
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// Platform representation of a mnemonic key press
///
/// Two chords are equal when they carry the same key code and the same set
/// of modifiers; the typed character is kept for display only.
///
/// # Example
/// ```ignore
/// let chord = KeyChord::new(vec![Modifier::Shift], KeyCode(0x46), 'F');
/// assert_eq!(chord.to_string(), "SHIFT+F");
/// ```
#[derive(Clone, Debug, Deserialize, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyChord {
    /// Modifier keys, sorted and deduplicated
    pub modifiers: Vec<Modifier>,

    /// Virtual key code of the base key
    pub key_code: KeyCode,

    /// Character the chord was synthesised from
    pub key_char: char,
}

impl KeyChord {
    /// Create a new KeyChord with normalised modifiers
    pub fn new(mut modifiers: Vec<Modifier>, key_code: KeyCode, key_char: char) -> Self {
        modifiers.sort();
        modifiers.dedup();

        Self {
            modifiers,
            key_code,
            key_char,
        }
    }

    /// True if the chord requires Shift to be held.
    pub fn has_shift(&self) -> bool {
        self.modifiers.contains(&Modifier::Shift)
    }

    /// Combined modifier mask, suitable for comparing with host key events.
    pub fn modifier_mask(&self) -> u32 {
        self.modifiers.iter().fold(0, |mask, m| mask | m.mask())
    }
}

impl PartialEq for KeyChord {
    fn eq(&self, other: &Self) -> bool {
        self.key_code == other.key_code && self.modifiers == other.modifiers
    }
}

impl std::hash::Hash for KeyChord {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key_code.hash(state);
        self.modifiers.hash(state);
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key: String = self.key_char.to_uppercase().collect();

        if self.modifiers.is_empty() {
            write!(f, "{}", key)
        } else {
            let mods = self
                .modifiers
                .iter()
                .map(|m| format!("{}", m))
                .collect::<Vec<_>>()
                .join("+");
            write!(f, "{}+{}", mods, key)
        }
    }
}

/// A terminal binding that triggers a host action.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleBinding {
    pub key: char,
    pub key_chord: KeyChord,
    pub description: String,
    /// Opaque identifier of a host-registered action
    pub action_id: String,
}

/// A sub-menu entered by pressing `key`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBinding {
    pub key: char,
    pub key_chord: KeyChord,
    pub description: String,
    pub children: Vec<LeaderBinding>,
}

/// A node of the leader binding tree
///
/// # Example
/// ```ignore
/// // q -> Session...
/// //   f -> OpenAtamanConfigAction
/// let session = config.resolve(&['q']).unwrap();
/// assert!(session.is_group());
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LeaderBinding {
    Single(SingleBinding),
    Group(GroupBinding),
}

impl LeaderBinding {
    /// Mnemonic character that selects this binding.
    pub fn key(&self) -> char {
        match self {
            LeaderBinding::Single(b) => b.key,
            LeaderBinding::Group(b) => b.key,
        }
    }

    pub fn key_chord(&self) -> &KeyChord {
        match self {
            LeaderBinding::Single(b) => &b.key_chord,
            LeaderBinding::Group(b) => &b.key_chord,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            LeaderBinding::Single(b) => &b.description,
            LeaderBinding::Group(b) => &b.description,
        }
    }

    /// Action id for single bindings, `None` for groups.
    pub fn action_id(&self) -> Option<&str> {
        match self {
            LeaderBinding::Single(b) => Some(&b.action_id),
            LeaderBinding::Group(_) => None,
        }
    }

    /// Children of a group; empty for single bindings.
    pub fn children(&self) -> &[LeaderBinding] {
        match self {
            LeaderBinding::Single(_) => &[],
            LeaderBinding::Group(b) => &b.children,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, LeaderBinding::Group(_))
    }

    /// First child selected by `key`.
    ///
    /// Sibling keys are not required to be unique; the first match in
    /// display order wins.
    pub fn child(&self, key: char) -> Option<&LeaderBinding> {
        self.children().iter().find(|b| b.key() == key)
    }

    /// Number of levels in this subtree, counting this node.
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(LeaderBinding::depth)
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for LeaderBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderBinding::Single(b) => {
                write!(f, "{} {} → {}", b.key_chord, b.description, b.action_id)
            }
            LeaderBinding::Group(b) => {
                write!(f, "{} {} ({} entries)", b.key_chord, b.description, b.children.len())
            }
        }
    }
}

/// Display settings of the leader popup.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Appearance {
    pub title: Option<String>,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            title: Some(DEFAULT_TITLE.to_string()),
        }
    }
}

/// The compiled configuration
///
/// Built in full by a reload and never mutated afterwards; see
/// `config::ConfigStore` for how it is published.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Config {
    pub appearance: Appearance,
    pub bindings: Vec<LeaderBinding>,
}

impl Config {
    /// Walks `path` of mnemonics from the root, first match wins at each level.
    ///
    /// An empty path resolves to nothing.
    pub fn resolve(&self, path: &[char]) -> Option<&LeaderBinding> {
        let (first, rest) = path.split_first()?;
        let mut current = self.bindings.iter().find(|b| b.key() == *first)?;

        for key in rest {
            current = current.child(*key)?;
        }

        Some(current)
    }

    /// Depth of the deepest branch; zero for an empty tree.
    pub fn depth(&self) -> usize {
        self.bindings
            .iter()
            .map(LeaderBinding::depth)
            .max()
            .unwrap_or(0)
    }

    /// Title to display, falling back to the default.
    pub fn title(&self) -> &str {
        self.appearance.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }
}
