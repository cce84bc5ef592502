pub use crate::{logging_console, logging_critical, logging_debug, logging_emergency, logging_entry, logging_error, logging_information, logging_notice, logging_warning};
pub use common::utils::log_entry::analysis::AnalysisEntry;
pub use common::utils::log_entry::io::IOEntry;
pub use common::utils::log_entry::network::NetworkEntry;
pub use common::utils::log_entry::observation::ObservationEntry;
pub use common::utils::log_entry::system::SystemEntry;
pub use common::utils::logging::*;
pub use common::{critical_entry, debug_entry, emergency_entry, error_entry, information_entry, notice_entry, warning_entry};

use chrono::{DateTime, Local};
use lazy_static::lazy_static;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

lazy_static! {
    static ref LOGGER: RwLock<Logger> = RwLock::new(Logger::new());
}

pub struct Logger {
    system_log: Vec<LogEntry>,
}

impl Logger {
    fn new() -> Self {
        Self {
            system_log: vec![LogEntry::new(LogLevel::Information, "Logger", "Online now", "")],
        }
    }

    pub async fn instance() -> RwLockReadGuard<'static, Logger> {
        LOGGER.read().await
    }

    pub async fn instance_mut() -> RwLockWriteGuard<'static, Logger> {
        LOGGER.write().await
    }

    pub async fn add_system_log<T: Into<String>, U: Into<String>, V: Into<String>>(level: LogLevel, position: T, message: U, debug_info: V) {
        Self::add_system_log_entry(LogEntry::new(level, position, message, debug_info)).await;
    }

    pub async fn add_system_log_entry(log_entry: LogEntry) {
        Self::logging_console(&log_entry);
        Self::instance_mut().await.push(log_entry);
    }

    pub fn logging_console(log_entry: &LogEntry) {
        logging_console(log_entry);
    }

    pub async fn get_system_logs() -> Vec<LogEntry> {
        Self::instance().await.system_log.clone()
    }

    pub async fn get_system_logs_since(time: DateTime<Local>) -> Vec<LogEntry> {
        Self::instance().await.since(time).to_vec()
    }

    fn push(&mut self, log_entry: LogEntry) {
        self.system_log.push(log_entry);
    }

    fn since(&self, time: DateTime<Local>) -> &[LogEntry] {
        let index = self.system_log.partition_point(|entry| entry.timestamp < time);
        &self.system_log[index..]
    }
}

#[macro_export]
macro_rules! logging_with_level {
    ($level:expr, $message:expr) => {
        $crate::utils::logging::Logger::add_system_log($level, format!("{}:{}", file!(), line!()), $message, "").await
    };
    ($level:expr, $message:expr, $debug_info:expr) => {
        $crate::utils::logging::Logger::add_system_log($level, format!("{}:{}", file!(), line!()), $message, $debug_info).await
    };
}

#[macro_export]
macro_rules! logging_debug {
    ($($arg:expr),+) => { $crate::logging_with_level!(common::utils::logging::LogLevel::Debug, $($arg),+) };
}

#[macro_export]
macro_rules! logging_information {
    ($($arg:expr),+) => { $crate::logging_with_level!(common::utils::logging::LogLevel::Information, $($arg),+) };
}

#[macro_export]
macro_rules! logging_notice {
    ($($arg:expr),+) => { $crate::logging_with_level!(common::utils::logging::LogLevel::Notice, $($arg),+) };
}

#[macro_export]
macro_rules! logging_warning {
    ($($arg:expr),+) => { $crate::logging_with_level!(common::utils::logging::LogLevel::Warning, $($arg),+) };
}

#[macro_export]
macro_rules! logging_error {
    ($($arg:expr),+) => { $crate::logging_with_level!(common::utils::logging::LogLevel::Error, $($arg),+) };
}

#[macro_export]
macro_rules! logging_critical {
    ($($arg:expr),+) => { $crate::logging_with_level!(common::utils::logging::LogLevel::Critical, $($arg),+) };
}

#[macro_export]
macro_rules! logging_emergency {
    ($($arg:expr),+) => { $crate::logging_with_level!(common::utils::logging::LogLevel::Emergency, $($arg),+) };
}

#[macro_export]
macro_rules! logging_entry {
    ($entry:expr) => {
        $crate::utils::logging::Logger::add_system_log_entry($entry).await
    };
}

#[macro_export]
macro_rules! logging_console {
    ($entry:expr) => {
        $crate::utils::logging::Logger::logging_console(&$entry)
    };
}
