pub mod cache;
pub mod controller;
pub mod graph;
pub mod rules;
pub mod settings;

// Re-exports for convenience
pub use cache::HighlightCache;
pub use controller::HighlightController;
pub use graph::{HostGraph, MemoryGraph, SegmentFacts, SegmentGeometry, SegmentId};
pub use settings::SettingsStore;
