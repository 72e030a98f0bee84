//! Host graph interface.
//!
//! The network graph belongs to the host simulation; Gridlight only reads it.
//! [`HostGraph`] is the narrow query surface the cache and renderer consume:
//! segment liveness, the flat classification view ([`SegmentFacts`]), and the
//! live draw geometry ([`SegmentGeometry`]).
//!
//! Classification attributes are computed once per read into a flat tagged
//! view instead of being re-derived through the host's type hierarchy, so the
//! rule engine can operate on plain enums.

mod memory;

pub use memory::MemoryGraph;

use std::ops::BitOr;

/// Handle into the host's segment table.
///
/// `0` is reserved and must never be looked up or stored. Ids are recycled by
/// the host, so liveness has to be re-checked on every read that touches host
/// state.
pub type SegmentId = u32;

/// Coarse network family of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkFamily {
    /// Pedestrian paths and pedestrian ways.
    Path,
    /// Roads, including highways and pedestrian streets.
    Road,
    /// Heavy rail.
    Train,
    Metro,
    Monorail,
    CableCar,
}

/// Structural variant of a segment within its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Structure {
    Plain,
    Bridge,
    Tunnel,
}

/// Set of vehicle kinds a single lane carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VehicleSet(u8);

impl VehicleSet {
    pub const NONE: Self = Self(0);
    pub const CAR: Self = Self(1);
    pub const TRAM: Self = Self(1 << 1);
    pub const TROLLEYBUS: Self = Self(1 << 2);

    /// Union of two sets, usable in const contexts.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether this set shares any vehicle kind with `other`.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for VehicleSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Read-only classification view of a segment.
///
/// Everything the rule engine needs, flattened out of the host's prefab data
/// at read time. Missing data (an empty name, no lanes) classifies as "no
/// match" downstream rather than being an error here.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentFacts {
    pub family: NetworkFamily,
    pub structure: Structure,
    /// Prefab display name, used for exact and substring identity checks.
    pub name: String,
    /// Item-class name, used to detect pedestrian streets.
    pub class_name: String,
    /// Per-lane vehicle capability sets.
    pub lanes: Vec<VehicleSet>,
    /// The host type's own highway predicate.
    pub is_highway: bool,
    /// Whether building this network flattens terrain.
    pub flattens_terrain: bool,
}

impl SegmentFacts {
    pub fn new(family: NetworkFamily, structure: Structure) -> Self {
        Self {
            family,
            structure,
            name: String::new(),
            class_name: String::new(),
            lanes: Vec::new(),
            is_highway: false,
            flattens_terrain: false,
        }
    }
}

/// A 2D world-space point (top-down plan view).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Live draw geometry of a segment.
///
/// Read fresh from the host every frame, never cached: the host may move
/// nodes under us. End directions point into the curve from each endpoint,
/// matching the host's own middle-point convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentGeometry {
    pub start: Point,
    pub end: Point,
    pub start_dir: Point,
    pub end_dir: Point,
    /// Height of the deck above ground level, for visibility clipping.
    pub elevation: f32,
    /// Half of the prefab's physical width.
    pub half_width: f32,
}

impl SegmentGeometry {
    /// Straight ground-level segment between two points.
    pub fn straight(start: Point, end: Point, half_width: f32) -> Self {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let len = (dx * dx + dy * dy).sqrt().max(f32::EPSILON);
        let dir = Point::new(dx / len, dy / len);
        Self {
            start,
            end,
            start_dir: dir,
            end_dir: Point::new(-dir.x, -dir.y),
            elevation: 0.0,
            half_width,
        }
    }

    pub fn with_elevation(mut self, elevation: f32) -> Self {
        self.elevation = elevation;
        self
    }
}

/// Query surface of the host's network graph.
///
/// Implementations must tolerate any id, including `0` and ids past the
/// current capacity; those simply read as not live.
pub trait HostGraph: Send + Sync {
    /// One past the highest id ever allocated. A full scan visits
    /// `1..capacity()` in ascending order.
    fn capacity(&self) -> SegmentId;

    /// Whether the segment currently exists in the host graph.
    fn is_live(&self, id: SegmentId) -> bool;

    /// Classification view of a live segment, `None` otherwise.
    fn facts(&self, id: SegmentId) -> Option<SegmentFacts>;

    /// Current draw geometry of a live segment, `None` otherwise.
    fn geometry(&self, id: SegmentId) -> Option<SegmentGeometry>;
}
