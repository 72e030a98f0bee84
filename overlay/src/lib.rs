//! Overlay rendering for Gridlight.
//!
//! Consumes a highlight cache snapshot once per frame and turns each
//! matching segment into a single ribbon draw call. The drawing itself goes
//! through the [`DrawBackend`] trait; [`SkiaBackend`] is the bundled
//! software implementation.

pub mod draw;
pub mod renderer;
pub mod ribbon;
pub mod skia;

pub use draw::{ClipRange, DrawBackend, DrawError, DEFAULT_CLIP};
pub use renderer::OverlayRenderer;
pub use ribbon::Ribbon;
pub use skia::SkiaBackend;
