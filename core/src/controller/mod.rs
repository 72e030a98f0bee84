//! Activation controller.
//!
//! Owns the single "is highlighting active" flag and drives the cache
//! through its lifecycle: rebuild on activation, clear on deactivation,
//! rebuild on settings changes while active. Host lifecycle notifications
//! pass through here so the cache only sees created-events while active;
//! released-events are always forwarded because removal is safe either way.
//!
//! This is an explicitly constructed service object, not a process-wide
//! singleton: the harness builds one, hands it to the notification sources
//! and the render loop, and drops it on shutdown. Activation flips are
//! published on a broadcast channel so UI mirrors can react without polling.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use crate::cache::HighlightCache;
use crate::graph::{HostGraph, SegmentId};
use crate::settings::SettingsStore;

const CHANNEL_CAPACITY: usize = 16;

/// Gates every cache mutation behind the activation state machine.
pub struct HighlightController {
    graph: Arc<dyn HostGraph>,
    cache: Arc<HighlightCache>,
    settings: Arc<SettingsStore>,
    /// Activation flag; the mutex also serializes transitions so two
    /// concurrent flips cannot interleave their rebuild/clear work.
    active: Mutex<bool>,
    activation_tx: broadcast::Sender<bool>,
}

impl HighlightController {
    pub fn new(
        graph: Arc<dyn HostGraph>,
        cache: Arc<HighlightCache>,
        settings: Arc<SettingsStore>,
    ) -> Self {
        let (activation_tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            graph,
            cache,
            settings,
            active: Mutex::new(false),
            activation_tx,
        }
    }

    pub fn is_active(&self) -> bool {
        *self.lock_active()
    }

    /// Flip the activation state.
    ///
    /// `Inactive -> Active` rebuilds the cache from the current host graph;
    /// `Active -> Inactive` clears it. Setting the current state again is a
    /// no-op and emits no notification.
    pub fn set_active(&self, value: bool) {
        let mut active = self.lock_active();
        if *active == value {
            return;
        }
        *active = value;

        if value {
            let config = self.settings.snapshot();
            self.cache.rebuild(self.graph.as_ref(), &config);
            tracing::info!(matched = self.cache.len(), "highlighting activated");
        } else {
            self.cache.clear();
            tracing::info!("highlighting deactivated");
        }

        let _ = self.activation_tx.send(value);
    }

    /// Settings-changed callback.
    ///
    /// While active this is always a full rebuild: a config write can flip
    /// rule outcomes in ways cheaper to recompute than to diff. While
    /// inactive nothing happens; the next activation rebuilds anyway.
    pub fn settings_changed(&self) {
        let active = self.lock_active();
        if !*active {
            return;
        }
        let config = self.settings.snapshot();
        self.cache.rebuild(self.graph.as_ref(), &config);
        tracing::debug!(matched = self.cache.len(), "cache rebuilt after settings change");
    }

    /// Host notification: a segment was just created.
    /// Dropped while inactive; the activation rebuild picks it up later.
    pub fn on_segment_created(&self, id: SegmentId) {
        let active = self.lock_active();
        if !*active {
            return;
        }
        let config = self.settings.snapshot();
        self.cache.on_segment_created(self.graph.as_ref(), &config, id);
    }

    /// Host notification: a segment was released.
    /// Processed unconditionally; removing from an empty map is free.
    pub fn on_segment_released(&self, id: SegmentId) {
        self.cache.on_segment_released(id);
    }

    /// Subscribe to activation flips.
    pub fn subscribe_activation(&self) -> broadcast::Receiver<bool> {
        self.activation_tx.subscribe()
    }

    pub fn cache(&self) -> &Arc<HighlightCache> {
        &self.cache
    }

    pub fn settings(&self) -> &Arc<SettingsStore> {
        &self.settings
    }

    fn lock_active(&self) -> MutexGuard<'_, bool> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
