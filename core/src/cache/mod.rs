//! Incremental highlight cache.
//!
//! Flat mapping from segment id to render color, holding exactly the set of
//! live segments that classify as a match under the current configuration.
//! Bulk rebuilt on activation and configuration changes, kept correct by
//! point updates as the host creates and releases segments.
//!
//! One exclusive mutex guards every access to the map: rebuild, point
//! insert, point remove, and the snapshot copy. Rebuilds run to completion
//! under the lock, so a reader taking a snapshot sees either the fully-old
//! or the fully-new set, never a mix, and a rebuild racing a rapid config
//! change is fully superseded by whichever pass takes the lock last.
//! The lock is never held across draw calls; readers copy the pairs out and
//! iterate lock-free.

use std::sync::{Mutex, MutexGuard, PoisonError};

use gridlight_types::{Color, HighlightConfig};
use hashbrown::HashMap;

use crate::graph::{HostGraph, SegmentId};
use crate::rules;

/// Concurrency-safe `SegmentId -> Color` index of matching segments.
#[derive(Debug, Default)]
pub struct HighlightCache {
    segments: Mutex<HashMap<SegmentId, Color>>,
}

impl HighlightCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full rebuild: scan every live segment in ascending id order, classify
    /// it, and keep the matches. Replaces whatever the map held before.
    pub fn rebuild(&self, graph: &dyn HostGraph, config: &HighlightConfig) {
        let mut segments = self.lock();
        segments.clear();

        for id in 1..graph.capacity() {
            if !graph.is_live(id) {
                continue;
            }
            let Some(facts) = graph.facts(id) else {
                continue;
            };
            if let Some(color) = rules::classify(&facts, config) {
                segments.insert(id, color);
            }
        }

        tracing::debug!(matched = segments.len(), "highlight cache rebuilt");
    }

    /// Point update for a just-created segment.
    ///
    /// Tolerates ids that are zero or already gone again; classifies the
    /// segment and inserts on match, otherwise makes sure it is absent.
    pub fn on_segment_created(
        &self,
        graph: &dyn HostGraph,
        config: &HighlightConfig,
        id: SegmentId,
    ) {
        if id == 0 || !graph.is_live(id) {
            return;
        }
        let Some(facts) = graph.facts(id) else {
            return;
        };

        let mut segments = self.lock();
        match rules::classify(&facts, config) {
            Some(color) => {
                segments.insert(id, color);
            }
            None => {
                segments.remove(&id);
            }
        }
    }

    /// Point removal for a released segment. No-op if absent or id is zero.
    pub fn on_segment_released(&self, id: SegmentId) {
        if id == 0 {
            return;
        }
        self.lock().remove(&id);
    }

    /// Empty the map. Idempotent.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Copy the current pairs into a caller-supplied reusable buffer.
    ///
    /// The buffer's prior contents are discarded. The copy happens under the
    /// map lock; iteration of the buffer afterwards is lock-free.
    pub fn snapshot_into(&self, out: &mut Vec<(SegmentId, Color)>) {
        out.clear();
        let segments = self.lock();
        out.reserve(segments.len());
        out.extend(segments.iter().map(|(&id, &color)| (id, color)));
    }

    /// The cached color for a segment, if it currently matches.
    pub fn color_of(&self, id: SegmentId) -> Option<Color> {
        self.lock().get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SegmentId, Color>> {
        self.segments.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
