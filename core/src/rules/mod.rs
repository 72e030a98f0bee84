//! Segment classification rules.
//!
//! A pure, ordered decision procedure from a segment's classification view
//! plus one configuration snapshot to "matches with this color" or "does not
//! match". Rules are evaluated top to bottom and the first verdict wins;
//! later rules are never reached once an earlier one decides.
//!
//! Nothing here holds state or touches the host: the cache calls
//! [`classify`] during rebuilds and point inserts, and gets the same answer
//! for the same inputs every time.

use gridlight_types::{Category, Color, HighlightConfig};

use crate::graph::{NetworkFamily, SegmentFacts, Structure, VehicleSet};

/// Exact prefab name of the reserved decoration path variant.
pub const RESERVED_PATH_NAME: &str = "Pedestrian Connection";

/// Substring (lowercase) identifying terraforming networks by name.
pub const TERRAFORMING_MARKER: &str = "terraforming";

/// Item-class name of pedestrian streets within the road family.
pub const PEDESTRIAN_STREET_CLASS: &str = "Pedestrian Street";

const TRAM_LIKE: VehicleSet = VehicleSet::TRAM.union(VehicleSet::TROLLEYBUS);

/// Classify a segment under the given configuration.
///
/// Returns the render color of the first matching enabled category, or
/// `None` when nothing matches.
pub fn classify(facts: &SegmentFacts, config: &HighlightConfig) -> Option<Color> {
    match_category(facts, config).map(|category| config.color(category))
}

/// The category a segment classifies into, toggles included.
///
/// A segment whose only applicable category is disabled yields `None`; there
/// is no fallback between categories except where a rule spells one out.
pub fn match_category(facts: &SegmentFacts, config: &HighlightConfig) -> Option<Category> {
    // 1. Reserved decoration path, gated by both the path toggle and its own
    if is_reserved_path(facts) {
        if !config.highlight_paths || !config.highlight_reserved_paths {
            return None;
        }
        return Some(Category::ReservedPath);
    }

    // 2. Terraforming networks
    if is_terraforming(facts) {
        if !config.highlight_terraforming {
            return None;
        }
        return Some(Category::Terraforming);
    }

    match facts.family {
        // 3. Pedestrian paths; elevated/underground variants gated globally
        NetworkFamily::Path => {
            if !config.highlight_paths || !structure_allowed(facts.structure, config) {
                return None;
            }
            Some(Category::Path)
        }

        // 4./5. Rail families share the structural gating
        NetworkFamily::Train => {
            if !config.highlight_trains || !structure_allowed(facts.structure, config) {
                return None;
            }
            Some(Category::Train)
        }
        NetworkFamily::Metro => {
            if !config.highlight_metro || !structure_allowed(facts.structure, config) {
                return None;
            }
            Some(Category::Metro)
        }

        // 6./7. No structural sub-variants exist for these
        NetworkFamily::Monorail => config.highlight_monorail.then_some(Category::Monorail),
        NetworkFamily::CableCar => config.highlight_cable_cars.then_some(Category::CableCar),

        // 8. Roads
        NetworkFamily::Road => match_road(facts, config),
    }
}

fn is_reserved_path(facts: &SegmentFacts) -> bool {
    facts.family == NetworkFamily::Path
        && facts.structure == Structure::Plain
        && facts.name == RESERVED_PATH_NAME
}

fn is_terraforming(facts: &SegmentFacts) -> bool {
    facts.flattens_terrain && facts.name.to_ascii_lowercase().contains(TERRAFORMING_MARKER)
}

fn structure_allowed(structure: Structure, config: &HighlightConfig) -> bool {
    match structure {
        Structure::Plain => true,
        Structure::Bridge => config.highlight_bridges,
        Structure::Tunnel => config.highlight_tunnels,
    }
}

fn has_tram_like(facts: &SegmentFacts) -> bool {
    facts.lanes.iter().any(|lane| lane.intersects(TRAM_LIKE))
}

fn has_car_like(facts: &SegmentFacts) -> bool {
    facts.lanes.iter().any(|lane| lane.intersects(VehicleSet::CAR))
}

/// The road family carries the most involved rule: pedestrian streets and
/// highways are decided before the generic tram/car lane breakdown, and a
/// disabled highway toggle never falls back to the road category.
fn match_road(facts: &SegmentFacts, config: &HighlightConfig) -> Option<Category> {
    if !structure_allowed(facts.structure, config) {
        return None;
    }

    let tram_like = has_tram_like(facts);
    let car_like = has_car_like(facts);

    if facts.class_name == PEDESTRIAN_STREET_CLASS {
        // Rail on a pedestrian street outranks treating it as a path
        if tram_like && config.highlight_trams {
            return Some(Category::Tram);
        }
        return config.highlight_paths.then_some(Category::Path);
    }

    if facts.is_highway {
        return config.highlight_highways.then_some(Category::Highway);
    }

    if !car_like && !tram_like {
        return None;
    }

    if tram_like && !car_like {
        return config.highlight_trams.then_some(Category::Tram);
    }

    if tram_like && car_like {
        if config.highlight_trams {
            return Some(Category::Tram);
        }
        return config.highlight_roads.then_some(Category::Road);
    }

    // Car lanes only
    config.highlight_roads.then_some(Category::Road)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NetworkFamily, SegmentFacts, Structure, VehicleSet};

    fn facts(family: NetworkFamily, structure: Structure) -> SegmentFacts {
        SegmentFacts::new(family, structure)
    }

    fn road_with_lanes(lanes: &[VehicleSet]) -> SegmentFacts {
        SegmentFacts {
            lanes: lanes.to_vec(),
            ..facts(NetworkFamily::Road, Structure::Plain)
        }
    }

    fn config() -> HighlightConfig {
        // Distinct hues so every category maps to a distinguishable color
        let mut config = HighlightConfig::default();
        for (i, category) in Category::ALL.into_iter().enumerate() {
            config.set_hue(category, i as f32 / Category::ALL.len() as f32);
        }
        config
    }

    #[test]
    fn test_reserved_path_needs_both_toggles() {
        let segment = SegmentFacts {
            name: RESERVED_PATH_NAME.to_string(),
            ..facts(NetworkFamily::Path, Structure::Plain)
        };
        let mut cfg = config();
        assert_eq!(match_category(&segment, &cfg), Some(Category::ReservedPath));

        cfg.highlight_reserved_paths = false;
        assert_eq!(match_category(&segment, &cfg), None);

        cfg.highlight_reserved_paths = true;
        cfg.highlight_paths = false;
        assert_eq!(match_category(&segment, &cfg), None);
    }

    #[test]
    fn test_first_match_wins_over_generic_path() {
        // Matches both the reserved-path rule and the generic path rule;
        // the verdict must be the earlier rule's category.
        let segment = SegmentFacts {
            name: RESERVED_PATH_NAME.to_string(),
            ..facts(NetworkFamily::Path, Structure::Plain)
        };
        let cfg = config();
        assert_eq!(match_category(&segment, &cfg), Some(Category::ReservedPath));
        assert_eq!(
            classify(&segment, &cfg),
            Some(cfg.color(Category::ReservedPath))
        );
    }

    #[test]
    fn test_reserved_name_on_bridge_is_generic_path() {
        // The reserved variant is the plain path prefab only
        let segment = SegmentFacts {
            name: RESERVED_PATH_NAME.to_string(),
            ..facts(NetworkFamily::Path, Structure::Bridge)
        };
        assert_eq!(match_category(&segment, &config()), Some(Category::Path));
    }

    #[test]
    fn test_terraforming_requires_flag_and_name() {
        let mut segment = SegmentFacts {
            name: "Quay Terraforming Network".to_string(),
            flattens_terrain: true,
            ..facts(NetworkFamily::Path, Structure::Plain)
        };
        let mut cfg = config();
        assert_eq!(match_category(&segment, &cfg), Some(Category::Terraforming));

        // Case-insensitive name match
        segment.name = "TERRAFORMING tool".to_string();
        assert_eq!(match_category(&segment, &cfg), Some(Category::Terraforming));

        // Name alone is not enough
        segment.flattens_terrain = false;
        assert_eq!(match_category(&segment, &cfg), Some(Category::Path));

        // Flag alone is not enough
        segment.flattens_terrain = true;
        segment.name = "Gravel Path".to_string();
        assert_eq!(match_category(&segment, &cfg), Some(Category::Path));

        segment.name = "terraforming network".to_string();
        cfg.highlight_terraforming = false;
        assert_eq!(match_category(&segment, &cfg), None);
    }

    #[test]
    fn test_path_bridge_and_tunnel_gating() {
        let mut cfg = config();
        let bridge = facts(NetworkFamily::Path, Structure::Bridge);
        let tunnel = facts(NetworkFamily::Path, Structure::Tunnel);
        assert_eq!(match_category(&bridge, &cfg), Some(Category::Path));
        assert_eq!(match_category(&tunnel, &cfg), Some(Category::Path));

        cfg.highlight_bridges = false;
        assert_eq!(match_category(&bridge, &cfg), None);
        assert_eq!(match_category(&tunnel, &cfg), Some(Category::Path));

        cfg.highlight_tunnels = false;
        assert_eq!(match_category(&tunnel, &cfg), None);

        cfg.highlight_paths = false;
        cfg.highlight_bridges = true;
        assert_eq!(match_category(&bridge, &cfg), None);
    }

    #[test]
    fn test_rail_families() {
        let mut cfg = config();
        let train = facts(NetworkFamily::Train, Structure::Plain);
        let metro_tunnel = facts(NetworkFamily::Metro, Structure::Tunnel);
        assert_eq!(match_category(&train, &cfg), Some(Category::Train));
        assert_eq!(match_category(&metro_tunnel, &cfg), Some(Category::Metro));

        cfg.highlight_tunnels = false;
        assert_eq!(match_category(&metro_tunnel, &cfg), None);

        cfg.highlight_trains = false;
        assert_eq!(match_category(&train, &cfg), None);

        let monorail = facts(NetworkFamily::Monorail, Structure::Plain);
        let cable = facts(NetworkFamily::CableCar, Structure::Plain);
        assert_eq!(match_category(&monorail, &cfg), Some(Category::Monorail));
        assert_eq!(match_category(&cable, &cfg), Some(Category::CableCar));

        cfg.highlight_monorail = false;
        cfg.highlight_cable_cars = false;
        assert_eq!(match_category(&monorail, &cfg), None);
        assert_eq!(match_category(&cable, &cfg), None);
    }

    #[test]
    fn test_highway_never_falls_back_to_road() {
        let segment = SegmentFacts {
            is_highway: true,
            lanes: vec![VehicleSet::CAR],
            ..facts(NetworkFamily::Road, Structure::Plain)
        };
        let mut cfg = config();
        assert_eq!(match_category(&segment, &cfg), Some(Category::Highway));

        cfg.highlight_highways = false;
        cfg.highlight_roads = true;
        assert_eq!(match_category(&segment, &cfg), None);
    }

    #[test]
    fn test_road_lane_breakdown() {
        let cfg = config();

        // No usable lanes at all
        assert_eq!(match_category(&road_with_lanes(&[]), &cfg), None);
        assert_eq!(
            match_category(&road_with_lanes(&[VehicleSet::NONE]), &cfg),
            None
        );

        // Car only
        assert_eq!(
            match_category(&road_with_lanes(&[VehicleSet::CAR]), &cfg),
            Some(Category::Road)
        );

        // Tram only (trolleybus counts as tram-like)
        assert_eq!(
            match_category(&road_with_lanes(&[VehicleSet::TRAM]), &cfg),
            Some(Category::Tram)
        );
        assert_eq!(
            match_category(&road_with_lanes(&[VehicleSet::TROLLEYBUS]), &cfg),
            Some(Category::Tram)
        );
    }

    #[test]
    fn test_tram_road_tie_break_prefers_tram() {
        let segment = road_with_lanes(&[VehicleSet::CAR, VehicleSet::TRAM]);
        let mut cfg = config();
        cfg.highlight_trams = true;
        cfg.highlight_roads = true;
        assert_eq!(match_category(&segment, &cfg), Some(Category::Tram));

        cfg.highlight_trams = false;
        assert_eq!(match_category(&segment, &cfg), Some(Category::Road));

        cfg.highlight_roads = false;
        assert_eq!(match_category(&segment, &cfg), None);

        // Tram-only road with tram toggle off has no road fallback
        let tram_only = road_with_lanes(&[VehicleSet::TRAM]);
        cfg.highlight_roads = true;
        assert_eq!(match_category(&tram_only, &cfg), None);
    }

    #[test]
    fn test_road_bridge_gating_beats_lane_composition() {
        let segment = SegmentFacts {
            lanes: vec![VehicleSet::CAR, VehicleSet::TRAM],
            ..facts(NetworkFamily::Road, Structure::Bridge)
        };
        let mut cfg = config();
        cfg.highlight_roads = true;
        cfg.highlight_bridges = false;
        assert_eq!(match_category(&segment, &cfg), None);

        let tunnel = SegmentFacts {
            structure: Structure::Tunnel,
            ..segment
        };
        cfg.highlight_bridges = true;
        cfg.highlight_tunnels = false;
        assert_eq!(match_category(&tunnel, &cfg), None);
    }

    #[test]
    fn test_pedestrian_street_rules() {
        let mut segment = SegmentFacts {
            class_name: PEDESTRIAN_STREET_CLASS.to_string(),
            lanes: vec![VehicleSet::CAR],
            ..facts(NetworkFamily::Road, Structure::Plain)
        };
        let mut cfg = config();

        // Without rail lanes a pedestrian street counts as a path
        assert_eq!(match_category(&segment, &cfg), Some(Category::Path));
        cfg.highlight_paths = false;
        assert_eq!(match_category(&segment, &cfg), None);

        // With tram lanes the tram category outranks the path treatment
        segment.lanes.push(VehicleSet::TRAM);
        cfg.highlight_paths = true;
        assert_eq!(match_category(&segment, &cfg), Some(Category::Tram));

        // Tram toggle off falls back to the path treatment, never to roads
        cfg.highlight_trams = false;
        assert_eq!(match_category(&segment, &cfg), Some(Category::Path));
        cfg.highlight_paths = false;
        assert_eq!(match_category(&segment, &cfg), None);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let segment = road_with_lanes(&[VehicleSet::CAR, VehicleSet::TRAM]);
        let cfg = config();
        let first = classify(&segment, &cfg);
        for _ in 0..10 {
            assert_eq!(classify(&segment, &cfg), first);
        }
    }

    #[test]
    fn test_color_uses_category_hue_and_strength() {
        let segment = road_with_lanes(&[VehicleSet::CAR]);
        let mut cfg = config();
        cfg.highlight_strength = 0.5;
        let expected = Color::from_hue(cfg.hue(Category::Road), 0.5);
        assert_eq!(classify(&segment, &cfg), Some(expected));
    }
}
