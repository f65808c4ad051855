//! Rc file management, the active-config store and reloading.
//!
//! This module owns everything that touches the outside world:
//!
//! - **Rc file**: `~/.atamanrc.config`, created from a template on first use
//!   with an atomic write so a half-written template is never left behind
//! - **Config store**: the process-wide compiled config, swapped atomically
//! - **Reload**: rc file -> parse -> build -> publish, with user-visible
//!   notifications on failure and the previous config kept
//! - **Watcher**: optional file watching for live reloads
//!
//! # Example
//!
//! ```no_run
//! use ataman::config::{reload_config, ConfigStore, RcFile};
//! use ataman::host::ConsoleHost;
//!
//! let rc = RcFile::in_home()?;
//! let store = ConfigStore::new();
//! reload_config(&ConsoleHost, &rc, &store);
//!
//! println!("{} root bindings", store.current().config.bindings.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod error;
pub mod reload;
pub mod store;
pub mod watcher;

pub use error::ConfigError;
pub use reload::{open_config, reload_config, try_reload, NOTIFICATION_TITLE};
pub use store::{global, ConfigStore, LoadedConfig};
pub use watcher::FileWatcher;

/// File name of the rc file inside the home directory.
pub const RC_FILENAME: &str = ".atamanrc.config";

/// Contents written to a freshly created rc file.
pub const RC_TEMPLATE: &str = r#"# This file is written in HOCON (Human-Optimized Config Object Notation) format.
# For more information about HOCON see https://github.com/lightbend/config/blob/master/HOCON.md

appearance {
    title: Ataman
}
bindings {
    q {
        description: Session...
        bindings {
             f { actionId: OpenAtamanConfigAction, description: Open ~/.atamanrc.config }
        }
    },
}
"#;

/// Location of the user's rc file.
///
/// The file is not touched until `find_or_create` or `read_config` is
/// called, so constructing an `RcFile` never fails on a missing file.
#[derive(Clone, Debug, PartialEq)]
pub struct RcFile {
    path: PathBuf,
}

impl RcFile {
    /// Rc file at an explicit path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `~/.atamanrc.config`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SourceUnavailable` if there is no home directory.
    pub fn in_home() -> Result<Self, ConfigError> {
        dirs::home_dir()
            .map(|home| Self::new(home.join(RC_FILENAME)))
            .ok_or_else(|| ConfigError::SourceUnavailable(PathBuf::from("~").join(RC_FILENAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the rc file path, writing the template first if it is missing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SourceUnavailable` if the file is missing and
    /// cannot be created (for example, its directory does not exist).
    pub fn find_or_create(&self) -> Result<&Path, ConfigError> {
        if self.path.exists() {
            return Ok(&self.path);
        }

        match self.write_template() {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "Created rc file from template");
                Ok(&self.path)
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Could not create rc file");
                Err(ConfigError::SourceUnavailable(self.path.clone()))
            }
        }
    }

    /// Reads the rc file, creating it from the template if needed.
    pub fn read_config(&self) -> Result<String, ConfigError> {
        let path = self.find_or_create()?;
        Ok(fs::read_to_string(path)?)
    }

    fn write_template(&self) -> Result<(), ConfigError> {
        let mut file = AtomicWriteFile::options()
            .open(&self.path)
            .map_err(|e| ConfigError::WriteFailed(format!("Failed to open for atomic write: {}", e)))?;

        file.write_all(RC_TEMPLATE.as_bytes())
            .map_err(|e| ConfigError::WriteFailed(format!("Failed to write template: {}", e)))?;

        file.commit()
            .map_err(|e| ConfigError::WriteFailed(format!("Failed to commit atomic write: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests;
