//! In-memory host graph.
//!
//! Stands in for the live simulation so the engine can be exercised from the
//! REPL harness and from tests without a running host. Ids are slot indexes
//! plus one (id `0` stays reserved) and are recycled on release, the same way
//! the host recycles handles.

use std::sync::{Mutex, PoisonError};

use super::{HostGraph, SegmentFacts, SegmentGeometry, SegmentId};

#[derive(Debug, Clone)]
struct Slot {
    facts: SegmentFacts,
    geometry: SegmentGeometry,
}

/// Mutable in-memory segment table implementing [`HostGraph`].
#[derive(Debug, Default)]
pub struct MemoryGraph {
    slots: Mutex<Vec<Option<Slot>>>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a segment into the first free slot and return its id.
    pub fn insert(&self, facts: SegmentFacts, geometry: SegmentGeometry) -> SegmentId {
        let mut slots = self.lock();
        let slot = Slot { facts, geometry };
        if let Some(idx) = slots.iter().position(Option::is_none) {
            slots[idx] = Some(slot);
            idx as SegmentId + 1
        } else {
            slots.push(Some(slot));
            slots.len() as SegmentId
        }
    }

    /// Release a segment. Returns whether it was live.
    pub fn release(&self, id: SegmentId) -> bool {
        if id == 0 {
            return false;
        }
        let mut slots = self.lock();
        match slots.get_mut(id as usize - 1) {
            Some(slot) if slot.is_some() => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Number of live segments, for harness stats.
    pub fn live_count(&self) -> usize {
        self.lock().iter().filter(|s| s.is_some()).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Option<Slot>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HostGraph for MemoryGraph {
    fn capacity(&self) -> SegmentId {
        self.lock().len() as SegmentId + 1
    }

    fn is_live(&self, id: SegmentId) -> bool {
        if id == 0 {
            return false;
        }
        self.lock()
            .get(id as usize - 1)
            .is_some_and(Option::is_some)
    }

    fn facts(&self, id: SegmentId) -> Option<SegmentFacts> {
        if id == 0 {
            return None;
        }
        self.lock()
            .get(id as usize - 1)?
            .as_ref()
            .map(|slot| slot.facts.clone())
    }

    fn geometry(&self, id: SegmentId) -> Option<SegmentGeometry> {
        if id == 0 {
            return None;
        }
        self.lock()
            .get(id as usize - 1)?
            .as_ref()
            .map(|slot| slot.geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NetworkFamily, Point, Structure};

    fn road() -> SegmentFacts {
        SegmentFacts::new(NetworkFamily::Road, Structure::Plain)
    }

    fn geom() -> SegmentGeometry {
        SegmentGeometry::straight(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 4.0)
    }

    #[test]
    fn test_ids_start_at_one() {
        let graph = MemoryGraph::new();
        assert_eq!(graph.insert(road(), geom()), 1);
        assert_eq!(graph.insert(road(), geom()), 2);
        assert!(!graph.is_live(0));
        assert!(graph.is_live(1));
        assert_eq!(graph.capacity(), 3);
    }

    #[test]
    fn test_release_recycles_slots() {
        let graph = MemoryGraph::new();
        let a = graph.insert(road(), geom());
        let b = graph.insert(road(), geom());
        assert!(graph.release(a));
        assert!(!graph.release(a));
        assert!(!graph.is_live(a));
        assert!(graph.is_live(b));

        // The freed slot (and so the id) is reused
        let c = graph.insert(road(), geom());
        assert_eq!(c, a);
        assert_eq!(graph.live_count(), 2);
    }

    #[test]
    fn test_out_of_range_reads_are_not_live() {
        let graph = MemoryGraph::new();
        assert!(!graph.is_live(99));
        assert!(graph.facts(99).is_none());
        assert!(graph.geometry(99).is_none());
        assert!(!graph.release(99));
    }
}
