//! Highlight color model.
//!
//! Category colors are parameterized by a single hue scalar in `[0,1)` on a
//! fixed-saturation color wheel. The conversion to RGBA happens at
//! classification time: full saturation, value scaled by the global highlight
//! strength, alpha forced opaque. A strength of zero therefore yields opaque
//! black, which still counts as a match.

use serde::{Deserialize, Serialize};

/// An RGBA color with `f32` channels in `[0,1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Convert a hue at full saturation into an opaque color, scaling the
    /// value channel by `strength`.
    ///
    /// The hue wraps at 1.0 like an angle, so 1.25 and 0.25 produce the same
    /// color. `strength` is clamped to `[0,1]`.
    pub fn from_hue(hue: f32, strength: f32) -> Self {
        let v = strength.clamp(0.0, 1.0);
        let h = hue.rem_euclid(1.0) * 6.0;
        let sector = h.floor();
        let f = h - sector;

        // Full saturation: chroma equals value, minimum channel is zero.
        let x_up = v * f;
        let x_down = v * (1.0 - f);

        let (r, g, b) = match sector as u32 {
            0 => (v, x_up, 0.0),
            1 => (x_down, v, 0.0),
            2 => (0.0, v, x_up),
            3 => (0.0, x_down, v),
            4 => (x_up, 0.0, v),
            _ => (v, 0.0, x_down),
        };

        Self { r, g, b, a: 1.0 }
    }

    /// Recover the hue of a color, ignoring saturation and value.
    ///
    /// Inverse of [`Color::from_hue`] for UI round-trips (color pickers store
    /// hues, not colors). Achromatic colors map to hue 0.
    pub fn hue(&self) -> f32 {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;
        if delta <= f32::EPSILON {
            return 0.0;
        }

        let h = if max == self.r {
            ((self.g - self.b) / delta).rem_euclid(6.0)
        } else if max == self.g {
            (self.b - self.r) / delta + 2.0
        } else {
            (self.r - self.g) / delta + 4.0
        };
        h / 6.0
    }

    /// Convert to 8-bit RGBA, for raster backends.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl std::fmt::Display for Color {
    /// Hex form for logs and the harness, `#rrggbb` or `#rrggbbaa`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}
