//! Process-wide holder of the active config
//!
//! Readers take a snapshot (`Arc<LoadedConfig>`) and keep using it for as
//! long as they like; a reload never mutates a published snapshot. Writes
//! go through `publish`, which is only visible inside the crate so the
//! reload path stays the single writer.

use arc_swap::ArcSwap;
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use crate::core::Config;

/// A compiled config plus where and when it was loaded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadedConfig {
    pub config: Config,

    /// Publication time; `None` for the built-in default
    pub loaded_at: Option<DateTime<Local>>,

    /// Rc file the config was compiled from
    pub source: Option<PathBuf>,
}

/// Atomic cell holding the active `LoadedConfig`
///
/// Starts with the default config (default title, no bindings). Concurrent
/// reloads are last-writer-wins; a reader never sees a partially built tree.
pub struct ConfigStore {
    current: ArcSwap<LoadedConfig>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(LoadedConfig::default()),
        }
    }

    /// Snapshot of the active config.
    pub fn current(&self) -> Arc<LoadedConfig> {
        self.current.load_full()
    }

    /// True once a reload has succeeded at least once.
    pub fn is_loaded(&self) -> bool {
        self.current.load().loaded_at.is_some()
    }

    /// Replace the active config in a single pointer swap.
    pub(crate) fn publish(&self, loaded: LoadedConfig) -> Arc<LoadedConfig> {
        let loaded = Arc::new(loaded);
        self.current.store(Arc::clone(&loaded));
        loaded
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide store, created empty on first access.
pub fn global() -> &'static ConfigStore {
    static STORE: OnceLock<ConfigStore> = OnceLock::new();
    STORE.get_or_init(ConfigStore::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Appearance, DEFAULT_TITLE};

    #[test]
    fn test_starts_with_default_config() {
        let store = ConfigStore::new();
        let current = store.current();

        assert!(!store.is_loaded());
        assert_eq!(current.config.title(), DEFAULT_TITLE);
        assert!(current.config.bindings.is_empty());
        assert!(current.source.is_none());
    }

    #[test]
    fn test_publish_swaps_snapshot() {
        let store = ConfigStore::new();
        let before = store.current();

        let published = store.publish(LoadedConfig {
            config: Config {
                appearance: Appearance {
                    title: Some("New".to_string()),
                },
                bindings: Vec::new(),
            },
            loaded_at: Some(Local::now()),
            source: None,
        });

        let after = store.current();
        assert!(Arc::ptr_eq(&published, &after));
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.config.title(), "New");

        // Old snapshots are unaffected
        assert_eq!(before.config.title(), DEFAULT_TITLE);
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(global(), global()));
    }
}
