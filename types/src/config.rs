//! Highlight configuration.
//!
//! One flat struct holding every user-tunable knob: per-category toggles and
//! hues, the global strength and width scalars, and the cross-cutting
//! bridge/tunnel toggles. The struct is `serde`-friendly so the settings
//! store can persist it as TOML; unknown or missing fields fall back to the
//! shipped defaults.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// The highlight categories a segment can classify into.
///
/// Each category has its own toggle and hue in [`HighlightConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Path,
    ReservedPath,
    Terraforming,
    Road,
    Highway,
    Train,
    Metro,
    Tram,
    Monorail,
    CableCar,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Path,
        Category::ReservedPath,
        Category::Terraforming,
        Category::Road,
        Category::Highway,
        Category::Train,
        Category::Metro,
        Category::Tram,
        Category::Monorail,
        Category::CableCar,
    ];

    /// Stable lowercase name, used by the harness and for display.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Path => "paths",
            Category::ReservedPath => "reserved-paths",
            Category::Terraforming => "terraforming",
            Category::Road => "roads",
            Category::Highway => "highways",
            Category::Train => "trains",
            Category::Metro => "metro",
            Category::Tram => "trams",
            Category::Monorail => "monorail",
            Category::CableCar => "cable-cars",
        }
    }

    /// Parse a category name as produced by [`Category::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Full highlight configuration snapshot.
///
/// Classification always reads one consistent snapshot of this struct; the
/// settings store hands out clones so a mid-frame write can never tear a
/// classification call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Global value-channel scalar applied to every category color.
    pub highlight_strength: f32,
    /// Global multiplier on the drawn ribbon width.
    pub highlight_width: f32,

    pub path_hue: f32,
    pub reserved_path_hue: f32,
    pub terraforming_hue: f32,
    pub road_hue: f32,
    pub highway_hue: f32,
    pub train_hue: f32,
    pub metro_hue: f32,
    pub tram_hue: f32,
    pub monorail_hue: f32,
    pub cable_car_hue: f32,

    pub highlight_paths: bool,
    pub highlight_reserved_paths: bool,
    pub highlight_terraforming: bool,
    pub highlight_roads: bool,
    pub highlight_highways: bool,
    pub highlight_trains: bool,
    pub highlight_metro: bool,
    pub highlight_trams: bool,
    pub highlight_monorail: bool,
    pub highlight_cable_cars: bool,

    /// Cross-cutting modifier: include bridge structures.
    pub highlight_bridges: bool,
    /// Cross-cutting modifier: include tunnel structures.
    pub highlight_tunnels: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            highlight_strength: 1.0,
            highlight_width: 1.0,
            path_hue: 0.25,
            reserved_path_hue: 0.95,
            terraforming_hue: 0.3,
            road_hue: 0.5,
            highway_hue: 0.65,
            train_hue: 0.1,
            metro_hue: 0.01,
            tram_hue: 0.85,
            monorail_hue: 0.85,
            cable_car_hue: 0.85,
            highlight_paths: true,
            highlight_reserved_paths: true,
            highlight_terraforming: true,
            highlight_roads: true,
            highlight_highways: true,
            highlight_trains: true,
            highlight_metro: true,
            highlight_trams: true,
            highlight_monorail: true,
            highlight_cable_cars: true,
            highlight_bridges: true,
            highlight_tunnels: true,
        }
    }
}

impl HighlightConfig {
    /// Whether a category's toggle is on.
    pub fn enabled(&self, category: Category) -> bool {
        match category {
            Category::Path => self.highlight_paths,
            Category::ReservedPath => self.highlight_reserved_paths,
            Category::Terraforming => self.highlight_terraforming,
            Category::Road => self.highlight_roads,
            Category::Highway => self.highlight_highways,
            Category::Train => self.highlight_trains,
            Category::Metro => self.highlight_metro,
            Category::Tram => self.highlight_trams,
            Category::Monorail => self.highlight_monorail,
            Category::CableCar => self.highlight_cable_cars,
        }
    }

    /// A category's configured hue.
    pub fn hue(&self, category: Category) -> f32 {
        match category {
            Category::Path => self.path_hue,
            Category::ReservedPath => self.reserved_path_hue,
            Category::Terraforming => self.terraforming_hue,
            Category::Road => self.road_hue,
            Category::Highway => self.highway_hue,
            Category::Train => self.train_hue,
            Category::Metro => self.metro_hue,
            Category::Tram => self.tram_hue,
            Category::Monorail => self.monorail_hue,
            Category::CableCar => self.cable_car_hue,
        }
    }

    pub fn set_enabled(&mut self, category: Category, value: bool) {
        match category {
            Category::Path => self.highlight_paths = value,
            Category::ReservedPath => self.highlight_reserved_paths = value,
            Category::Terraforming => self.highlight_terraforming = value,
            Category::Road => self.highlight_roads = value,
            Category::Highway => self.highlight_highways = value,
            Category::Train => self.highlight_trains = value,
            Category::Metro => self.highlight_metro = value,
            Category::Tram => self.highlight_trams = value,
            Category::Monorail => self.highlight_monorail = value,
            Category::CableCar => self.highlight_cable_cars = value,
        }
    }

    pub fn set_hue(&mut self, category: Category, value: f32) {
        let slot = match category {
            Category::Path => &mut self.path_hue,
            Category::ReservedPath => &mut self.reserved_path_hue,
            Category::Terraforming => &mut self.terraforming_hue,
            Category::Road => &mut self.road_hue,
            Category::Highway => &mut self.highway_hue,
            Category::Train => &mut self.train_hue,
            Category::Metro => &mut self.metro_hue,
            Category::Tram => &mut self.tram_hue,
            Category::Monorail => &mut self.monorail_hue,
            Category::CableCar => &mut self.cable_car_hue,
        };
        *slot = value;
    }

    /// The render color for a category under the current strength.
    pub fn color(&self, category: Category) -> Color {
        Color::from_hue(self.hue(category), self.highlight_strength)
    }
}
