//! Settings store.
//!
//! Owns the live [`HighlightConfig`], persists it as TOML through `confy`,
//! and broadcasts a settings-changed notification after every effective
//! write. Setters skip no-op writes (float fields compare with an epsilon)
//! so sliders dragged back to their current value neither hit the disk nor
//! trigger a cache rebuild.
//!
//! Persistence failures never reach the frame path: saves are logged and
//! dropped, and a failed load falls back to the shipped defaults.

use std::sync::{Mutex, MutexGuard, PoisonError};

use gridlight_types::{Category, HighlightConfig};
use thiserror::Error;
use tokio::sync::broadcast;

/// confy application name; decides the on-disk config location.
const APP_NAME: &str = "gridlight";

/// Capacity of the settings-changed broadcast channel. Receivers that lag
/// behind only miss intermediate notifications, never the final state.
const CHANNEL_CAPACITY: usize = 16;

/// Tolerance for "the slider did not actually move" float comparisons.
const FLOAT_EPSILON: f32 = 1e-6;

/// Errors from explicit persistence calls.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to persist settings: {0}")]
    Persist(#[from] confy::ConfyError),
}

/// Shared owner of the highlight configuration.
pub struct SettingsStore {
    config: Mutex<HighlightConfig>,
    changed_tx: broadcast::Sender<()>,
    persist: bool,
}

impl SettingsStore {
    /// Load the persisted configuration, falling back to defaults if the
    /// file is missing or unreadable.
    pub fn load() -> Self {
        let config = match confy::load::<HighlightConfig>(APP_NAME, None) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load settings, using defaults");
                HighlightConfig::default()
            }
        };
        Self::with_config(config, true)
    }

    /// Store that never touches the disk; for tests and the harness.
    pub fn in_memory(config: HighlightConfig) -> Self {
        Self::with_config(config, false)
    }

    fn with_config(config: HighlightConfig, persist: bool) -> Self {
        let (changed_tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            config: Mutex::new(config),
            changed_tx,
            persist,
        }
    }

    /// One consistent snapshot of the current configuration.
    pub fn snapshot(&self) -> HighlightConfig {
        self.lock().clone()
    }

    /// Subscribe to settings-changed notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.changed_tx.subscribe()
    }

    // ─── Field mutators ──────────────────────────────────────────────────────

    pub fn set_category_enabled(&self, category: Category, value: bool) {
        self.update(|config| {
            if config.enabled(category) == value {
                return false;
            }
            config.set_enabled(category, value);
            true
        });
    }

    pub fn set_category_hue(&self, category: Category, value: f32) {
        self.update(|config| {
            if (config.hue(category) - value).abs() < FLOAT_EPSILON {
                return false;
            }
            config.set_hue(category, value);
            true
        });
    }

    pub fn set_strength(&self, value: f32) {
        self.update(|config| {
            if (config.highlight_strength - value).abs() < FLOAT_EPSILON {
                return false;
            }
            config.highlight_strength = value;
            true
        });
    }

    pub fn set_width(&self, value: f32) {
        self.update(|config| {
            if (config.highlight_width - value).abs() < FLOAT_EPSILON {
                return false;
            }
            config.highlight_width = value;
            true
        });
    }

    pub fn set_bridges(&self, value: bool) {
        self.update(|config| {
            if config.highlight_bridges == value {
                return false;
            }
            config.highlight_bridges = value;
            true
        });
    }

    pub fn set_tunnels(&self, value: bool) {
        self.update(|config| {
            if config.highlight_tunnels == value {
                return false;
            }
            config.highlight_tunnels = value;
            true
        });
    }

    /// Restore the shipped defaults. Saves and notifies once.
    pub fn reset_to_defaults(&self) {
        self.update(|config| {
            let defaults = HighlightConfig::default();
            if *config == defaults {
                return false;
            }
            *config = defaults;
            true
        });
    }

    /// Explicit save for callers that want the error.
    pub fn save(&self) -> Result<(), SettingsError> {
        let config = self.snapshot();
        self.store(&config)
    }

    /// Apply a mutation; if it reports an effective change, persist and
    /// broadcast. The save happens while the config lock is still held, so
    /// two racing writes cannot reach the disk in the opposite order of
    /// their application. Only the broadcast waits for the lock release.
    fn update(&self, mutate: impl FnOnce(&mut HighlightConfig) -> bool) {
        {
            let mut config = self.lock();
            if !mutate(&mut config) {
                return;
            }
            if let Err(e) = self.store(&config) {
                tracing::error!(error = %e, "failed to save settings");
            }
        }
        // No receivers is fine; the notification is best-effort fan-out
        let _ = self.changed_tx.send(());
    }

    fn store(&self, config: &HighlightConfig) -> Result<(), SettingsError> {
        if !self.persist {
            return Ok(());
        }
        confy::store(APP_NAME, None, config)?;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, HighlightConfig> {
        self.config.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_change_broadcasts() {
        let store = SettingsStore::in_memory(HighlightConfig::default());
        let mut rx = store.subscribe();

        store.set_category_enabled(Category::Road, false);
        assert!(rx.try_recv().is_ok());
        assert!(!store.snapshot().highlight_roads);
    }

    #[test]
    fn test_noop_write_does_not_broadcast() {
        let store = SettingsStore::in_memory(HighlightConfig::default());
        let mut rx = store.subscribe();

        store.set_category_enabled(Category::Road, true); // already true
        store.set_strength(1.0); // already 1.0
        store.set_category_hue(Category::Road, 0.5); // already 0.5
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_hue_and_scalar_setters() {
        let store = SettingsStore::in_memory(HighlightConfig::default());
        store.set_category_hue(Category::Tram, 0.33);
        store.set_strength(0.6);
        store.set_width(2.5);
        store.set_bridges(false);
        store.set_tunnels(false);

        let config = store.snapshot();
        assert_eq!(config.hue(Category::Tram), 0.33);
        assert_eq!(config.highlight_strength, 0.6);
        assert_eq!(config.highlight_width, 2.5);
        assert!(!config.highlight_bridges);
        assert!(!config.highlight_tunnels);
    }

    #[test]
    fn test_reset_to_defaults_notifies_once() {
        let store = SettingsStore::in_memory(HighlightConfig::default());
        store.set_strength(0.2);
        store.set_category_enabled(Category::Path, false);

        let mut rx = store.subscribe();
        store.reset_to_defaults();
        assert_eq!(store.snapshot(), HighlightConfig::default());
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());

        // Already at defaults: nothing further to do
        store.reset_to_defaults();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_racing_writers_do_not_deadlock_or_tear() {
        use std::sync::Arc;

        let store = Arc::new(SettingsStore::in_memory(HighlightConfig::default()));
        let mut rx = store.subscribe();

        // Writers persist inside the config critical section now; hammer the
        // setters from two threads to prove the nested path neither
        // deadlocks nor leaves a value no writer produced.
        let writers: Vec<_> = [0.2f32, 0.8f32]
            .into_iter()
            .map(|value| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        store.set_strength(value);
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().expect("writer thread");
        }

        let strength = store.snapshot().highlight_strength;
        assert!(strength == 0.2 || strength == 0.8);
        // A lagged receiver still proves notifications were sent
        match rx.try_recv() {
            Ok(()) | Err(broadcast::error::TryRecvError::Lagged(_)) => {}
            Err(e) => panic!("expected at least one settings notification, got {e}"),
        }
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_writes() {
        let store = SettingsStore::in_memory(HighlightConfig::default());
        let snapshot = store.snapshot();
        store.set_category_enabled(Category::Road, false);
        assert!(snapshot.highlight_roads);
    }
}
