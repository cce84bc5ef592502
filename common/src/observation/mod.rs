pub mod bounding_box;
pub mod deduplicator;
pub mod event;
pub mod localized_object;
pub mod observation;
pub mod recent_box_memory;
pub mod retention_policy;

pub use bounding_box::BoundingBox;
pub use deduplicator::{classify, Classification, Deduplicator, DEFAULT_THRESHOLD};
pub use event::Event;
pub use localized_object::{observations_from_objects, LocalizedObject, Vertex};
pub use observation::{Observation, RawObservation};
pub use recent_box_memory::{MemoryEntry, RecentBoxMemory};
pub use retention_policy::RetentionPolicy;
