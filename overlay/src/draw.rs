//! Draw backend interface.
//!
//! One stateless call per segment per frame: "draw this curved ribbon with
//! this width and color, clipped to these visibility bounds". Backends own
//! whatever surface they render to; the renderer never looks at pixels.

use std::fmt;

use gridlight_types::Color;

use crate::ribbon::Ribbon;

/// Vertical visibility bounds for a draw call.
///
/// Ribbons whose deck elevation falls outside the range are culled by the
/// backend (tunnels far underground, clutter above the view ceiling).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRange {
    pub min_elevation: f32,
    pub max_elevation: f32,
}

impl ClipRange {
    pub fn contains(&self, elevation: f32) -> bool {
        elevation >= self.min_elevation && elevation <= self.max_elevation
    }
}

/// Default clip bounds for overlay passes, matching the host's own overlay
/// effect call.
pub const DEFAULT_CLIP: ClipRange = ClipRange {
    min_elevation: -100.0,
    max_elevation: 1280.0,
};

/// Errors a backend can report.
#[derive(Debug)]
pub enum DrawError {
    /// The render surface could not be created or has gone away.
    Surface(String),
    /// A single draw call failed; the frame pass should continue.
    Draw(String),
    /// Writing an exported image failed.
    Export(String),
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::Surface(msg) => write!(f, "render surface unavailable: {msg}"),
            DrawError::Draw(msg) => write!(f, "draw call failed: {msg}"),
            DrawError::Export(msg) => write!(f, "image export failed: {msg}"),
        }
    }
}

impl std::error::Error for DrawError {}

/// A backend that can draw highlight ribbons.
pub trait DrawBackend {
    /// Draw one ribbon of the given total width and color.
    ///
    /// Called at most once per segment per frame. A returned error applies
    /// to this ribbon only; the caller skips it and carries on.
    fn draw_ribbon(
        &mut self,
        ribbon: &Ribbon,
        width: f32,
        color: Color,
        clip: ClipRange,
    ) -> Result<(), DrawError>;
}
