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

//! src/core/keys.rs
//!
//! Key chord synthesis for mnemonic characters
//!
//! Every binding carries the chord a host would receive when the user types
//! its mnemonic. Uppercase letters need Shift; everything else is pressed
//! bare. The base key code is case-insensitive, so `f` and `F` share
//! `VK_F` and differ only in their modifiers.

use crate::core::types::{KeyChord, KeyCode, Modifier};

/// Source of key chords for the binding tree builder
///
/// The default is [`PlatformKeys`]. Hosts with their own key tables can
/// provide another implementation; any `Fn(char) -> KeyChord` works too.
pub trait KeyChordProvider {
    fn key_chord(&self, key: char) -> KeyChord;
}

/// AWT-compatible virtual key codes
#[derive(Clone, Copy, Debug, Default)]
pub struct PlatformKeys;

impl KeyChordProvider for PlatformKeys {
    fn key_chord(&self, key: char) -> KeyChord {
        synthesize(key)
    }
}

impl<F> KeyChordProvider for F
where
    F: Fn(char) -> KeyChord,
{
    fn key_chord(&self, key: char) -> KeyChord {
        self(key)
    }
}

/// Build the chord for a mnemonic character
///
/// # Example
/// ```ignore
/// assert!(!synthesize('f').has_shift());
/// assert!(synthesize('F').has_shift());
/// assert_eq!(synthesize('f').key_code, synthesize('F').key_code);
/// ```
pub fn synthesize(key: char) -> KeyChord {
    let modifiers = if key.is_uppercase() {
        vec![Modifier::Shift]
    } else {
        Vec::new()
    };

    KeyChord::new(modifiers, key_code_for_char(key), key)
}

/// Virtual key code for the key that produces `c`
///
/// Characters with a dedicated key use its code; anything else maps into
/// the extended range keyed on the lowercase code point.
pub fn key_code_for_char(c: char) -> KeyCode {
    let code = match c {
        'a'..='z' => c.to_ascii_uppercase() as u32,
        'A'..='Z' | '0'..='9' => c as u32,
        '\u{8}' | '\t' | '\n' | '\u{1b}' | ' ' | ',' | '-' | '.' | '/' | ';' | '=' | '[' | '\\'
        | ']' | '\u{7f}' => c as u32,
        '\'' => 0xDE,
        '`' => 0xC0,
        '"' => 0x98,
        '&' => 0x96,
        '*' => 0x97,
        '<' => 0x99,
        '>' => 0xA0,
        '{' => 0xA1,
        '}' => 0xA2,
        '@' => 0x200,
        ':' => 0x201,
        '^' => 0x202,
        '$' => 0x203,
        '€' => 0x204,
        '!' => 0x205,
        '#' => 0x208,
        '(' => 0x207,
        '+' => 0x209,
        ')' => 0x20A,
        '_' => 0x20B,
        '¡' => 0x20C,
        _ => {
            let lower = c.to_lowercase().next().unwrap_or(c);
            KeyCode::EXTENDED_BASE + lower as u32
        }
    };

    KeyCode(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_has_no_modifier() {
        let chord = synthesize('f');
        assert!(chord.modifiers.is_empty());
        assert_eq!(chord.key_code, KeyCode(0x46));
        assert_eq!(chord.key_char, 'f');
    }

    #[test]
    fn test_uppercase_has_shift() {
        let chord = synthesize('F');
        assert_eq!(chord.modifiers, vec![Modifier::Shift]);
        assert_eq!(chord.key_code, KeyCode(0x46));
        assert_eq!(chord.modifier_mask(), Modifier::Shift.mask());
    }

    #[test]
    fn test_case_pairs_share_key_code() {
        for (lower, upper) in ('a'..='z').zip('A'..='Z') {
            assert_eq!(key_code_for_char(lower), key_code_for_char(upper));
        }
    }

    #[test]
    fn test_digits_and_punctuation() {
        assert_eq!(key_code_for_char('1'), KeyCode(0x31));
        assert_eq!(key_code_for_char(' '), KeyCode(0x20));
        assert_eq!(key_code_for_char('/'), KeyCode(0x2F));
        assert_eq!(key_code_for_char('`'), KeyCode(0xC0));
        assert!(!synthesize('1').has_shift());
    }

    #[test]
    fn test_non_ascii_letters_use_extended_codes() {
        let lower = key_code_for_char('ж');
        let upper = key_code_for_char('Ж');

        assert!(lower.is_extended());
        assert_eq!(lower, upper);
        assert!(synthesize('Ж').has_shift());
        assert!(!synthesize('ж').has_shift());
    }

    #[test]
    fn test_closure_provider() {
        let fixed = |c: char| KeyChord::new(vec![], KeyCode(1), c);
        assert_eq!(fixed.key_chord('x').key_code, KeyCode(1));
        assert_eq!(PlatformKeys.key_chord('x'), synthesize('x'));
    }
}
