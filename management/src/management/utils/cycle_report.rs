use chrono::{DateTime, FixedOffset};
use common::observation::{BoundingBox, Classification, Event};
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RecordedCar {
    pub event_id: Uuid,
    pub bounding_box: BoundingBox,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    pub timestamp: DateTime<FixedOffset>,
}

/// What one upload produced, in detector order.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub cycle: u64,
    pub cars: Vec<RecordedCar>,
    pub duplicate: usize,
    pub rejected: Vec<String>,
}

impl CycleReport {
    pub fn new(classification: &Classification, events: &[Event]) -> Self {
        let cars = classification
            .novel
            .iter()
            .zip(events)
            .map(|(observation, event)| RecordedCar {
                event_id: event.event_id,
                bounding_box: observation.bounding_box,
                confidence: observation.confidence,
                timestamp: event.timestamp,
            })
            .collect();
        Self {
            cycle: classification.cycle,
            cars,
            duplicate: classification.duplicate.len(),
            rejected: classification.rejected.iter().map(ToString::to_string).collect(),
        }
    }
}
