//! Per-frame highlight rendering.
//!
//! Takes one cache snapshot per frame into a reusable scratch buffer, then
//! issues exactly one draw call per still-live segment. Geometry is read
//! from the host graph at draw time, never cached: the snapshot can be a
//! frame stale relative to segment destruction or node moves, so liveness is
//! re-checked and stale ids skipped silently.

use gridlight_core::controller::HighlightController;
use gridlight_core::graph::{HostGraph, SegmentId};
use gridlight_types::Color;

use crate::draw::{ClipRange, DrawBackend, DEFAULT_CLIP};
use crate::ribbon::Ribbon;

/// Frame-iteration driver over the highlight cache.
pub struct OverlayRenderer {
    /// Reused across frames to avoid per-frame allocation.
    scratch: Vec<(SegmentId, Color)>,
    clip: ClipRange,
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayRenderer {
    pub fn new() -> Self {
        Self {
            scratch: Vec::new(),
            clip: DEFAULT_CLIP,
        }
    }

    /// Render one frame. Returns the number of ribbons drawn.
    ///
    /// Nothing happens while the controller is inactive. A draw failure for
    /// one segment is logged and skipped; the pass continues.
    pub fn render_frame(
        &mut self,
        controller: &HighlightController,
        graph: &dyn HostGraph,
        backend: &mut dyn DrawBackend,
    ) -> usize {
        if !controller.is_active() {
            return 0;
        }

        let width_factor = controller.settings().snapshot().highlight_width;
        controller.cache().snapshot_into(&mut self.scratch);

        let mut drawn = 0;
        for &(id, color) in &self.scratch {
            // Snapshot may be stale relative to destruction
            if !graph.is_live(id) {
                continue;
            }
            let Some(geometry) = graph.geometry(id) else {
                continue;
            };

            let ribbon = Ribbon::from_geometry(&geometry);
            let width = geometry.half_width * 2.0 * width_factor;
            match backend.draw_ribbon(&ribbon, width, color, self.clip) {
                Ok(()) => drawn += 1,
                Err(e) => {
                    tracing::debug!(segment = id, error = %e, "skipping failed ribbon draw");
                }
            }
        }
        drawn
    }
}
