use crate::observation::bounding_box::BoundingBox;
use crate::observation::observation::{Observation, RawObservation};
use crate::observation::recent_box_memory::RecentBoxMemory;
use crate::observation::retention_policy::RetentionPolicy;
use crate::utils::log_entry::observation::ObservationEntry;
use chrono::{DateTime, FixedOffset};

pub const DEFAULT_THRESHOLD: f64 = 0.01;

/// Splits `new_boxes` into boxes not yet in `memory` and returns the memory
/// with those boxes added.
///
/// Boxes are checked in the given order against the prior memory plus every
/// box already accepted from this batch, so a batch never yields two boxes
/// that are similar to each other. No retention is applied here.
pub fn classify(new_boxes: &[BoundingBox], mut memory: RecentBoxMemory, threshold: f64) -> (Vec<BoundingBox>, RecentBoxMemory) {
    let mut novel = Vec::new();
    for bounding_box in new_boxes {
        if !memory.contains_similar(bounding_box, threshold) {
            memory.remember(*bounding_box);
            novel.push(*bounding_box);
        }
    }
    (novel, memory)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classification {
    pub cycle: u64,
    pub novel: Vec<Observation>,
    pub duplicate: Vec<Observation>,
    pub rejected: Vec<ObservationEntry>,
}

impl Classification {
    pub fn summary(&self) -> ObservationEntry {
        ObservationEntry::CycleClassified {
            cycle: self.cycle,
            novel: self.novel.len(),
            duplicate: self.duplicate.len(),
            rejected: self.rejected.len(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Deduplicator {
    pub threshold: f64,
    pub policy: RetentionPolicy,
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, RetentionPolicy::default())
    }
}

impl Deduplicator {
    pub fn new(threshold: f64, policy: RetentionPolicy) -> Self {
        Self {
            threshold,
            policy,
        }
    }

    pub fn classify(&self, observations: &[Observation], memory: RecentBoxMemory, observed_at: DateTime<FixedOffset>) -> (Classification, RecentBoxMemory) {
        self.classify_checked(observations.iter().copied().map(Ok), memory, observed_at)
    }

    /// Same as [`Deduplicator::classify`] for unchecked input. Malformed boxes
    /// end up in `rejected` and the rest of the batch is still processed.
    pub fn classify_raw(&self, observations: Vec<RawObservation>, memory: RecentBoxMemory, observed_at: DateTime<FixedOffset>) -> (Classification, RecentBoxMemory) {
        self.classify_checked(observations.into_iter().map(Observation::try_from), memory, observed_at)
    }

    fn classify_checked<I>(&self, observations: I, mut memory: RecentBoxMemory, observed_at: DateTime<FixedOffset>) -> (Classification, RecentBoxMemory)
    where
        I: IntoIterator<Item = Result<Observation, ObservationEntry>>,
    {
        memory.begin_cycle(self.policy, observed_at);
        let mut classification = Classification {
            cycle: memory.cycle(),
            ..Default::default()
        };
        for observation in observations {
            match observation {
                Ok(observation) => {
                    if memory.contains_similar(&observation.bounding_box, self.threshold) {
                        classification.duplicate.push(observation);
                    } else {
                        memory.remember(observation.bounding_box);
                        classification.novel.push(observation);
                    }
                }
                Err(entry) => classification.rejected.push(entry),
            }
        }
        (classification, memory)
    }
}
