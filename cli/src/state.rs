//! Harness state.
//!
//! Wires the in-memory host graph, the cache, the settings store, and the
//! activation controller together the way a host integration would, and
//! keeps the renderer's scratch buffer alive across frames.

use std::sync::Arc;

use gridlight_core::cache::HighlightCache;
use gridlight_core::controller::HighlightController;
use gridlight_core::graph::{HostGraph, MemoryGraph};
use gridlight_core::settings::SettingsStore;
use gridlight_overlay::OverlayRenderer;

pub struct HarnessState {
    pub graph: Arc<MemoryGraph>,
    pub controller: Arc<HighlightController>,
    pub renderer: OverlayRenderer,
    /// Monotonic counter laying out inserted sample segments side by side.
    pub next_slot: u32,
}

impl HarnessState {
    /// Build the full service wiring with persisted settings.
    pub fn new() -> Self {
        Self::with_settings(SettingsStore::load())
    }

    /// Wiring with an explicit settings store (tests use `in_memory`).
    pub fn with_settings(settings: SettingsStore) -> Self {
        let graph = Arc::new(MemoryGraph::new());
        let cache = Arc::new(HighlightCache::new());
        let controller = Arc::new(HighlightController::new(
            Arc::clone(&graph) as Arc<dyn HostGraph>,
            cache,
            Arc::new(settings),
        ));
        Self {
            graph,
            controller,
            renderer: OverlayRenderer::new(),
            next_slot: 0,
        }
    }
}

impl Default for HarnessState {
    fn default() -> Self {
        Self::new()
    }
}
