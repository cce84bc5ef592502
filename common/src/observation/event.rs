use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A confirmed novel car sighting. Never updated once recorded.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Event {
    pub event_id: Uuid,
    pub timestamp: DateTime<FixedOffset>,
}

impl Event {
    pub fn new(timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            timestamp,
        }
    }

    pub fn in_timezone(&self, timezone: &FixedOffset) -> Self {
        Self {
            event_id: self.event_id,
            timestamp: self.timestamp.with_timezone(timezone),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    pub fn within(&self, start: NaiveDate, end: NaiveDate) -> bool {
        let date = self.date();
        start <= date && date <= end
    }
}
