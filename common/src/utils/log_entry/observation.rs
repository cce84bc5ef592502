use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObservationEntry {
    #[error("Invalid bounding box: expected 4 coordinates, got {0}")]
    InvalidBoxError(usize),
    #[error("Invalid bounding box: coordinate {0} is not finite")]
    NonFiniteCoordinateError(usize),
    #[error("Detector returned no usable objects")]
    EmptyInputWarning,
    #[error("Cycle {cycle}: {novel} novel, {duplicate} duplicate, {rejected} rejected")]
    CycleClassified { cycle: u64, novel: usize, duplicate: usize, rejected: usize },
    #[error("Recent box memory reset, {0} boxes dropped")]
    MemoryReset(usize),
}

impl From<ObservationEntry> for String {
    #[inline(always)]
    fn from(value: ObservationEntry) -> Self {
        value.to_string()
    }
}
