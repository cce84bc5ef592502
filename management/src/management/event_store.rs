use crate::utils::logging::*;
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use common::observation::Event;
use lazy_static::lazy_static;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

lazy_static! {
    static ref EVENT_STORE: RwLock<EventStore> = RwLock::new(EventStore::new());
}

/// Append-only record of confirmed sightings, mirrored to a JSON-lines file.
/// Events are held in the reference timezone whatever offset they were
/// written with.
pub struct EventStore {
    events: Vec<Event>,
    path: Option<PathBuf>,
    timezone: FixedOffset,
}

impl EventStore {
    fn new() -> Self {
        Self {
            events: Vec::new(),
            path: None,
            timezone: Utc.fix(),
        }
    }

    pub async fn instance() -> RwLockReadGuard<'static, Self> {
        EVENT_STORE.read().await
    }

    pub async fn instance_mut() -> RwLockWriteGuard<'static, Self> {
        EVENT_STORE.write().await
    }

    pub async fn initialize<P: AsRef<Path>>(path: P, timezone: FixedOffset) {
        let path = path.as_ref().to_path_buf();
        let events = match fs::read_to_string(&path).await {
            Ok(content) => {
                let (events, errors) = Self::parse_lines(&content);
                for error in errors {
                    logging_error!(error);
                }
                events
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                logging_critical!(IOEntry::ReadFileError(path.display(), err));
                Vec::new()
            }
        };
        let loaded = events.len();
        {
            let mut event_store = Self::instance_mut().await;
            event_store.timezone = timezone;
            event_store.events = events.iter().map(|event| event.in_timezone(&timezone)).collect();
            event_store.path = Some(path);
        }
        logging_information!(SystemEntry::EventStoreLoaded(loaded));
    }

    pub async fn append(events: &[Event]) {
        if events.is_empty() {
            return;
        }
        let mut event_store = Self::instance_mut().await;
        let timezone = event_store.timezone;
        event_store.events.extend(events.iter().map(|event| event.in_timezone(&timezone)));
        if let Some(path) = event_store.path.clone() {
            if let Err(entry) = Self::write_lines(&path, events).await {
                logging_error!(entry);
            }
        }
    }

    pub async fn select(start: NaiveDate, end: NaiveDate) -> Vec<Event> {
        Self::instance().await.within(start, end)
    }

    pub async fn count() -> usize {
        Self::instance().await.events.len()
    }

    fn within(&self, start: NaiveDate, end: NaiveDate) -> Vec<Event> {
        self.events.iter().filter(|event| event.within(start, end)).copied().collect()
    }

    fn parse_lines(content: &str) -> (Vec<Event>, Vec<String>) {
        let mut events = Vec::new();
        let mut errors = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Event>(line) {
                Ok(event) => events.push(event),
                Err(err) => errors.push(IOEntry::SerdeDeserializeError(index + 1, err).to_string()),
            }
        }
        (events, errors)
    }

    async fn write_lines(path: &Path, events: &[Event]) -> Result<(), String> {
        let mut buffer = String::new();
        for event in events {
            let line = serde_json::to_string(event).map_err(|err| IOEntry::SerdeSerializeError(err).to_string())?;
            buffer.push_str(&line);
            buffer.push('\n');
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|err| IOEntry::WriteFileError(path.display(), err).to_string())?;
        file.write_all(buffer.as_bytes())
            .await
            .map_err(|err| IOEntry::WriteFileError(path.display(), err).to_string())?;
        Ok(())
    }
}
