use crate::management::event_store::EventStore;
use crate::management::utils::cycle_report::CycleReport;
use crate::utils::config::Config;
use crate::utils::logging::*;
use chrono::{DateTime, FixedOffset, Utc};
use common::observation::{observations_from_objects, Classification, Deduplicator, Event, LocalizedObject, RawObservation, RecentBoxMemory};
use lazy_static::lazy_static;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

lazy_static! {
    static ref OBSERVATION_MANAGER: RwLock<ObservationManager> = RwLock::new(ObservationManager::new(Deduplicator::default()));
}

/// Owns the recent box memory. Every cycle runs under the write guard, so
/// concurrent uploads are classified one after another.
pub struct ObservationManager {
    deduplicator: Deduplicator,
    memory: RecentBoxMemory,
}

impl ObservationManager {
    fn new(deduplicator: Deduplicator) -> Self {
        Self {
            deduplicator,
            memory: RecentBoxMemory::new(),
        }
    }

    pub async fn instance() -> RwLockReadGuard<'static, Self> {
        OBSERVATION_MANAGER.read().await
    }

    pub async fn instance_mut() -> RwLockWriteGuard<'static, Self> {
        OBSERVATION_MANAGER.write().await
    }

    pub async fn configure(deduplicator: Deduplicator) {
        Self::instance_mut().await.deduplicator = deduplicator;
        logging_information!(format!("Observation Manager: threshold {}, retention {}.", deduplicator.threshold, deduplicator.policy));
    }

    /// Detector output: keeps tracked labels, then records the novel cars.
    pub async fn process_objects(objects: Vec<LocalizedObject>) -> CycleReport {
        let labels = Config::now().await.tracked_labels;
        let observations = observations_from_objects(&objects, &labels)
            .into_iter()
            .map(RawObservation::from)
            .collect();
        Self::process(observations).await
    }

    pub async fn process(observations: Vec<RawObservation>) -> CycleReport {
        let timezone = Config::now().await.timezone();
        Self::record(observations, timezone).await
    }

    pub async fn record(observations: Vec<RawObservation>, timezone: FixedOffset) -> CycleReport {
        if observations.is_empty() {
            logging_notice!(ObservationEntry::EmptyInputWarning);
        }
        let mut observation_manager = Self::instance_mut().await;
        let observed_at = Utc::now().with_timezone(&timezone);
        let classification = observation_manager.run_cycle(observations, observed_at);
        let events: Vec<Event> = classification.novel.iter().map(|_| Event::new(observed_at)).collect();
        EventStore::append(&events).await;
        drop(observation_manager);

        for rejected in &classification.rejected {
            logging_warning!(format!("Observation Manager: {rejected}."));
        }
        logging_information!(classification.summary());
        CycleReport::new(&classification, &events)
    }

    pub async fn memory() -> RecentBoxMemory {
        Self::instance().await.memory.clone()
    }

    pub async fn reset_memory() -> usize {
        let dropped = Self::instance_mut().await.memory.clear();
        logging_notice!(ObservationEntry::MemoryReset(dropped));
        dropped
    }

    fn run_cycle(&mut self, observations: Vec<RawObservation>, observed_at: DateTime<FixedOffset>) -> Classification {
        let memory = std::mem::take(&mut self.memory);
        let (classification, memory) = self.deduplicator.classify_raw(observations, memory, observed_at);
        self.memory = memory;
        classification
    }
}
