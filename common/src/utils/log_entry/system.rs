use std::io::Error as IoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SystemEntry {
    #[error("Online now")]
    Online,
    #[error("Initializing")]
    Initializing,
    #[error("Initialization completed")]
    InitializeComplete,
    #[error("Termination in process")]
    Terminating,
    #[error("Termination completed")]
    TerminateComplete,
    #[error("Invalid configuration")]
    InvalidConfig,
    #[error("Port, timezone and event store changes require a restart")]
    RestartRequired,
    #[error("Configuration updated")]
    ConfigUpdated,
    #[error("Web service ready")]
    WebReady,
    #[error("Web service panic: {0}")]
    WebPanic(IoError),
    #[error("Event store loaded {0} events")]
    EventStoreLoaded(usize),
}

impl From<SystemEntry> for String {
    #[inline(always)]
    fn from(value: SystemEntry) -> Self {
        value.to_string()
    }
}
