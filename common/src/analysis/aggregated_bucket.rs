use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct AggregatedBucket {
    pub start: NaiveDateTime,
    pub count: usize,
}

impl AggregatedBucket {
    pub fn new(start: NaiveDateTime, count: usize) -> Self {
        Self {
            start,
            count,
        }
    }
}
