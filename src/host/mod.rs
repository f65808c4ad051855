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

//! Host environment integration
//!
//! The compiler never talks to a UI directly. Whatever embeds it (an editor
//! plugin, the `ataman` CLI) implements [`Host`] to:
//! - show user-visible notifications
//! - open the rc file in an editor
//! - optionally supply its own key chords for mnemonics
//!
//! # Example
//! ```
//! use ataman::host::{Host, Notification, Severity};
//! use std::path::Path;
//!
//! struct Silent;
//!
//! impl Host for Silent {
//!     fn notify(&self, notification: Notification) {
//!         assert_eq!(notification.severity, Severity::Error);
//!     }
//!
//!     fn open_file(&self, _path: &Path) -> std::io::Result<()> {
//!         Ok(())
//!     }
//! }
//! ```

use colored::*;
use std::fmt;
use std::path::Path;

use crate::core::{keys, KeyChord};

/// Notification severity
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A user-visible message
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn error(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Services the embedding application provides
pub trait Host {
    /// Show a notification to the user.
    fn notify(&self, notification: Notification);

    /// Open `path` in the host's editor.
    fn open_file(&self, path: &Path) -> std::io::Result<()>;

    /// Chord for a mnemonic character.
    ///
    /// Hosts with a window system override this to build the chord from a
    /// real key event; the default uses the platform key table.
    fn key_chord(&self, key: char) -> KeyChord {
        keys::synthesize(key)
    }
}

/// Terminal host used by the `ataman` binary
///
/// Notifications go to stderr, files are opened with the desktop's default
/// application.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleHost;

impl Host for ConsoleHost {
    fn notify(&self, notification: Notification) {
        let marker = match notification.severity {
            Severity::Info => "ℹ".cyan(),
            Severity::Warning => "⚠".yellow(),
            Severity::Error => "✗".red().bold(),
        };

        eprintln!(
            "{} {}: {}",
            marker,
            notification.title.bold(),
            notification.message
        );
    }

    fn open_file(&self, path: &Path) -> std::io::Result<()> {
        open::that(path)
    }
}

/// Host that records everything it is asked to do
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub notifications: std::cell::RefCell<Vec<Notification>>,
    pub opened: std::cell::RefCell<Vec<std::path::PathBuf>>,
}

#[cfg(test)]
impl Host for RecordingHost {
    fn notify(&self, notification: Notification) {
        self.notifications.borrow_mut().push(notification);
    }

    fn open_file(&self, path: &Path) -> std::io::Result<()> {
        self.opened.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}
