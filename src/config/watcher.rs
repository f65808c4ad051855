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

//! Rc file watcher for live reloads
//!
//! Watches the directory containing the rc file rather than the file itself:
//! most editors save by writing a new file and renaming it over the old one,
//! which would silently end a watch on the original inode.

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::{
    path::{Path, PathBuf},
    sync::mpsc::{channel, Receiver, RecvTimeoutError},
    time::Duration,
};

use crate::config::ConfigError;

/// Reports writes to a single rc file
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    target: PathBuf,
}

impl FileWatcher {
    pub fn new(path: &Path) -> Result<Self, ConfigError> {
        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )
        .map_err(|e| ConfigError::Watch(e.to_string()))?;

        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|e| ConfigError::Watch(e.to_string()))?;

        tracing::debug!(path = %path.display(), "Watching rc file");

        Ok(FileWatcher {
            _watcher: watcher,
            rx,
            target: path.to_path_buf(),
        })
    }

    /// Drains pending events (non-blocking); true if any touched the rc file.
    pub fn check_for_changes(&self) -> bool {
        let mut changed = false;
        while let Ok(event_result) = self.rx.try_recv() {
            changed |= self.is_relevant(event_result);
        }
        changed
    }

    /// Blocks until the rc file changes or `timeout` elapses.
    ///
    /// Returns `Err(ConfigError::Watch)` once the watcher has shut down.
    pub fn wait_for_change(&self, timeout: Duration) -> Result<bool, ConfigError> {
        match self.rx.recv_timeout(timeout) {
            Ok(event_result) => {
                // Editors emit bursts; fold the rest of the burst into this change
                let changed = self.is_relevant(event_result);
                Ok(self.check_for_changes() || changed)
            }
            Err(RecvTimeoutError::Timeout) => Ok(false),
            Err(RecvTimeoutError::Disconnected) => {
                Err(ConfigError::Watch("watcher disconnected".to_string()))
            }
        }
    }

    fn is_relevant(&self, event_result: notify::Result<Event>) -> bool {
        match event_result {
            Ok(event) => {
                matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
                    && event.paths.iter().any(|p| same_file_name(p, &self.target))
            }
            Err(e) => {
                tracing::warn!(error = %e, "File watcher error");
                false
            }
        }
    }
}

fn same_file_name(a: &Path, b: &Path) -> bool {
    a.file_name().is_some() && a.file_name() == b.file_name()
}
