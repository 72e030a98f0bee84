//! Software draw backend on tiny-skia.
//!
//! Renders highlight ribbons into an RGBA pixmap in a top-down plan view,
//! mainly for the harness and for frame snapshots. World coordinates map to
//! pixels through a center point and a uniform pixels-per-unit scale.

use std::path::Path as FsPath;

use gridlight_core::graph::Point;
use gridlight_types::Color;
use tiny_skia::{LineCap, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::draw::{ClipRange, DrawBackend, DrawError};
use crate::ribbon::Ribbon;

/// Pixmap-backed [`DrawBackend`].
pub struct SkiaBackend {
    pixmap: Pixmap,
    center: Point,
    /// Pixels per world unit.
    scale: f32,
}

impl SkiaBackend {
    /// Allocate the render surface.
    ///
    /// Fails once at construction if the pixmap cannot be allocated (zero
    /// dimension or out of memory); callers disable the affordance for the
    /// session instead of retrying per frame.
    pub fn new(width: u32, height: u32, center: Point, scale: f32) -> Result<Self, DrawError> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            DrawError::Surface(format!("cannot allocate {width}x{height} pixmap"))
        })?;
        Ok(Self {
            pixmap,
            center,
            scale,
        })
    }

    /// Reset the surface to fully transparent for a new frame.
    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Number of pixels touched by any draw so far (test/diagnostic aid).
    pub fn painted_pixels(&self) -> usize {
        self.pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
    }

    /// Export the current surface as a PNG file.
    pub fn save_png(&self, path: &FsPath) -> Result<(), DrawError> {
        self.pixmap
            .save_png(path)
            .map_err(|e| DrawError::Export(e.to_string()))
    }

    fn to_pixel(&self, p: Point) -> (f32, f32) {
        let x = (p.x - self.center.x) * self.scale + self.pixmap.width() as f32 / 2.0;
        let y = (p.y - self.center.y) * self.scale + self.pixmap.height() as f32 / 2.0;
        (x, y)
    }
}

impl DrawBackend for SkiaBackend {
    fn draw_ribbon(
        &mut self,
        ribbon: &Ribbon,
        width: f32,
        color: Color,
        clip: ClipRange,
    ) -> Result<(), DrawError> {
        if !clip.contains(ribbon.elevation) {
            // Outside the visibility bounds; culled, not an error
            return Ok(());
        }

        let mut pb = PathBuilder::new();
        let (ax, ay) = self.to_pixel(ribbon.a);
        let (bx, by) = self.to_pixel(ribbon.b);
        let (cx, cy) = self.to_pixel(ribbon.c);
        let (dx, dy) = self.to_pixel(ribbon.d);
        pb.move_to(ax, ay);
        pb.cubic_to(bx, by, cx, cy, dx, dy);
        let path = pb
            .finish()
            .ok_or_else(|| DrawError::Draw("degenerate ribbon path".to_string()))?;

        let [r, g, b, a] = color.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        let stroke = Stroke {
            width: (width * self.scale).max(1.0),
            line_cap: LineCap::Round,
            ..Stroke::default()
        };

        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DEFAULT_CLIP;
    use gridlight_core::graph::SegmentGeometry;

    fn backend() -> SkiaBackend {
        SkiaBackend::new(64, 64, Point::new(0.0, 0.0), 1.0).expect("pixmap")
    }

    fn ribbon_at(elevation: f32) -> Ribbon {
        let geometry = SegmentGeometry::straight(
            Point::new(-20.0, 0.0),
            Point::new(20.0, 0.0),
            4.0,
        )
        .with_elevation(elevation);
        Ribbon::from_geometry(&geometry)
    }

    #[test]
    fn test_zero_dimension_surface_is_construction_error() {
        assert!(SkiaBackend::new(0, 64, Point::new(0.0, 0.0), 1.0).is_err());
    }

    #[test]
    fn test_ribbon_paints_pixels() {
        let mut backend = backend();
        let color = Color::rgba(1.0, 0.0, 0.0, 1.0);
        backend
            .draw_ribbon(&ribbon_at(0.0), 4.0, color, DEFAULT_CLIP)
            .expect("draw");
        assert!(backend.painted_pixels() > 0);
    }

    #[test]
    fn test_out_of_clip_ribbon_is_culled() {
        let mut backend = backend();
        let color = Color::rgba(1.0, 0.0, 0.0, 1.0);
        backend
            .draw_ribbon(&ribbon_at(-200.0), 4.0, color, DEFAULT_CLIP)
            .expect("culled draw is not an error");
        assert_eq!(backend.painted_pixels(), 0);
    }

    #[test]
    fn test_clear_resets_surface() {
        let mut backend = backend();
        let color = Color::rgba(0.0, 1.0, 0.0, 1.0);
        backend
            .draw_ribbon(&ribbon_at(0.0), 4.0, color, DEFAULT_CLIP)
            .expect("draw");
        backend.clear();
        assert_eq!(backend.painted_pixels(), 0);
    }
}
