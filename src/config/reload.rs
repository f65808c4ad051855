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

//! Reload and open commands
//!
//! A reload either publishes a completely new config or changes nothing:
//!
//! 1. Find (or create) the rc file
//! 2. Parse it and build the binding tree off to the side
//! 3. Publish the result with a single swap
//!
//! Any failure in 1-2 becomes a notification and the store keeps whatever
//! it held before.

use chrono::Local;
use std::sync::Arc;

use crate::config::{ConfigError, ConfigStore, LoadedConfig, RcFile};
use crate::core::{compile_str, ConflictDetector, KeyChordProvider};
use crate::host::{Host, Notification};

/// Title of every notification raised by this crate.
pub const NOTIFICATION_TITLE: &str = "Ataman";

/// Reload the rc file into `store`
///
/// Failures are reported through `host` and leave `store` untouched.
/// Nothing is returned; observe the result through the store.
pub fn reload_config<H: Host + ?Sized>(host: &H, rc: &RcFile, store: &ConfigStore) {
    let keys = |key: char| host.key_chord(key);

    if let Err(e) = try_reload(rc, store, &keys) {
        host.notify(notification_for(&e));
    }
}

/// Reload the rc file into `store`, returning the outcome
///
/// # Returns
///
/// * `Ok(Arc<LoadedConfig>)` - The newly published snapshot
/// * `Err(ConfigError::SourceUnavailable)` - No rc file and none could be created
/// * `Err(ConfigError::Malformed)` - The rc file does not compile
/// * `Err(ConfigError::Io)` - The rc file exists but could not be read
///
/// On error the store is not modified.
pub fn try_reload(
    rc: &RcFile,
    store: &ConfigStore,
    keys: &impl KeyChordProvider,
) -> Result<Arc<LoadedConfig>, ConfigError> {
    let content = rc.read_config().inspect_err(|e| {
        tracing::error!(path = %rc.path().display(), error = %e, "Reload aborted");
    })?;

    let config = compile_str(&content, keys).map_err(|e| {
        tracing::warn!(path = %rc.path().display(), error = %e, "Config is malformed, keeping previous config");
        ConfigError::Malformed(e)
    })?;

    for conflict in ConflictDetector::from_tree(&config.bindings).find_conflicts() {
        tracing::warn!(%conflict, "Sibling bindings share a mnemonic; only the first is reachable");
    }

    let loaded = store.publish(LoadedConfig {
        config,
        loaded_at: Some(Local::now()),
        source: Some(rc.path().to_path_buf()),
    });

    tracing::info!(
        path = %rc.path().display(),
        bindings = loaded.config.bindings.len(),
        depth = loaded.config.depth(),
        "Config reloaded"
    );

    Ok(loaded)
}

/// Locate (creating if needed) the rc file and ask the host to open it.
pub fn open_config<H: Host + ?Sized>(host: &H, rc: &RcFile) {
    let path = match rc.find_or_create() {
        Ok(path) => path,
        Err(e) => {
            host.notify(notification_for(&e));
            return;
        }
    };

    if let Err(e) = host.open_file(path) {
        tracing::warn!(path = %path.display(), error = %e, "Host could not open rc file");
        host.notify(notification_for(&ConfigError::OpenFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        }));
    }
}

/// User-facing notification for a failed command.
pub fn notification_for(error: &ConfigError) -> Notification {
    let message = match error {
        ConfigError::SourceUnavailable(_) => "Could not find or create rc file. Aborting...".to_string(),
        ConfigError::Malformed(e) => format!("Config is malformed. Aborting...\n{}", e),
        ConfigError::Io(e) => format!("Config is malformed. Aborting...\n{}", e),
        other => other.to_string(),
    };

    Notification::error(NOTIFICATION_TITLE, message)
}
