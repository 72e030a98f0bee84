//! Sample segment prefabs for the harness.
//!
//! Each kind maps to a classification view a real host would hand us, so
//! every rule path can be exercised from the REPL without a live simulation.

use gridlight_core::graph::{
    NetworkFamily, Point, SegmentFacts, SegmentGeometry, Structure, VehicleSet,
};
use gridlight_core::rules::{PEDESTRIAN_STREET_CLASS, RESERVED_PATH_NAME};

/// World-unit spacing between inserted sample segments.
const SLOT_SPACING: f32 = 30.0;
const SEGMENT_LENGTH: f32 = 50.0;

pub const KINDS: &[&str] = &[
    "road",
    "road-bridge",
    "road-tunnel",
    "highway",
    "tram-road",
    "tram-track",
    "trolley-road",
    "ped-street",
    "ped-street-tram",
    "path",
    "path-bridge",
    "path-tunnel",
    "reserved-path",
    "terraforming",
    "train",
    "train-bridge",
    "train-tunnel",
    "metro",
    "monorail",
    "cable-car",
];

/// Build the facts and geometry for a sample kind, laid out at `slot`.
/// Returns `None` for an unknown kind.
pub fn build(kind: &str, slot: u32) -> Option<(SegmentFacts, SegmentGeometry)> {
    let facts = facts_for(kind)?;
    let geometry = geometry_for(&facts, slot);
    Some((facts, geometry))
}

fn facts_for(kind: &str) -> Option<SegmentFacts> {
    use NetworkFamily::*;
    use Structure::*;

    let car = VehicleSet::CAR;
    let tram = VehicleSet::TRAM;
    let trolley = VehicleSet::TROLLEYBUS;

    let facts = match kind {
        "road" => road(Plain, vec![car, car], false),
        "road-bridge" => road(Bridge, vec![car, car], false),
        "road-tunnel" => road(Tunnel, vec![car, car], false),
        "highway" => road(Plain, vec![car, car, car], true),
        "tram-road" => road(Plain, vec![car, car | tram], false),
        "tram-track" => road(Plain, vec![tram], false),
        "trolley-road" => road(Plain, vec![car, car | trolley], false),
        "ped-street" => SegmentFacts {
            class_name: PEDESTRIAN_STREET_CLASS.to_string(),
            ..road(Plain, vec![car], false)
        },
        "ped-street-tram" => SegmentFacts {
            class_name: PEDESTRIAN_STREET_CLASS.to_string(),
            ..road(Plain, vec![car, tram], false)
        },
        "path" => SegmentFacts::new(Path, Plain),
        "path-bridge" => SegmentFacts::new(Path, Bridge),
        "path-tunnel" => SegmentFacts::new(Path, Tunnel),
        "reserved-path" => SegmentFacts {
            name: RESERVED_PATH_NAME.to_string(),
            ..SegmentFacts::new(Path, Plain)
        },
        "terraforming" => SegmentFacts {
            name: "Terraforming Network".to_string(),
            flattens_terrain: true,
            ..SegmentFacts::new(Path, Plain)
        },
        "train" => SegmentFacts::new(Train, Plain),
        "train-bridge" => SegmentFacts::new(Train, Bridge),
        "train-tunnel" => SegmentFacts::new(Train, Tunnel),
        "metro" => SegmentFacts::new(Metro, Tunnel),
        "monorail" => SegmentFacts::new(Monorail, Plain),
        "cable-car" => SegmentFacts::new(CableCar, Plain),
        _ => return None,
    };
    Some(facts)
}

fn road(structure: Structure, lanes: Vec<VehicleSet>, is_highway: bool) -> SegmentFacts {
    SegmentFacts {
        lanes,
        is_highway,
        ..SegmentFacts::new(NetworkFamily::Road, structure)
    }
}

fn geometry_for(facts: &SegmentFacts, slot: u32) -> SegmentGeometry {
    let x = slot as f32 * SLOT_SPACING;
    let half_width = match facts.family {
        NetworkFamily::Road if facts.is_highway => 12.0,
        NetworkFamily::Road => 8.0,
        NetworkFamily::Train | NetworkFamily::Metro => 5.0,
        NetworkFamily::Monorail | NetworkFamily::CableCar => 3.0,
        NetworkFamily::Path => 1.5,
    };
    let elevation = match facts.structure {
        Structure::Plain => 0.0,
        Structure::Bridge => 12.0,
        Structure::Tunnel => -15.0,
    };
    SegmentGeometry::straight(
        Point::new(x, 0.0),
        Point::new(x, SEGMENT_LENGTH),
        half_width,
    )
    .with_elevation(elevation)
}
