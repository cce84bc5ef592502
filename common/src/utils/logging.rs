use chrono::{DateTime, Local};
use colored::*;
use serde::{Serialize, Serializer};
use std::fmt::Display;

pub use crate::{alert_entry, critical_entry, debug_entry, emergency_entry, error_entry, information_entry, notice_entry, warning_entry};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Information,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl LogLevel {
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "Debug",
            LogLevel::Information => "Information",
            LogLevel::Notice => "Notice",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
            LogLevel::Critical => "Critical",
            LogLevel::Alert => "Alert",
            LogLevel::Emergency => "Emergency",
        }
    }

    pub fn to_plain_string(&self) -> String {
        format!("{:<11}", self.label())
    }

    pub fn to_colored_string(&self) -> ColoredString {
        let padded = self.to_plain_string();
        match self {
            LogLevel::Debug => padded.bright_black(),
            LogLevel::Information => padded.bright_blue(),
            LogLevel::Notice => padded.bright_green(),
            LogLevel::Warning => padded.yellow(),
            LogLevel::Error => padded.bright_red(),
            LogLevel::Critical => padded.bright_yellow(),
            LogLevel::Alert => padded.red(),
            LogLevel::Emergency => padded.magenta(),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub timestamp: DateTime<Local>,
    pub position: String,
    pub message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub debug_info: String,
}

impl LogEntry {
    pub fn new<T: Into<String>, U: Into<String>, V: Into<String>>(level: LogLevel, position: T, message: U, debug_info: V) -> Self {
        Self {
            level,
            timestamp: Local::now(),
            position: position.into(),
            message: message.into(),
            debug_info: debug_info.into(),
        }
    }

    pub fn to_plain_string(&self) -> String {
        let timestamp = self.timestamp.format("%Y/%m/%d %H:%M:%S");
        let head = format!("[{}] {} {}: {}", self.level.to_plain_string(), timestamp, self.position, self.message);
        if self.debug_info.is_empty() {
            head
        } else {
            format!("{}\n{}", head, self.debug_info)
        }
    }

    pub fn to_colored_string(&self) -> String {
        let timestamp = self.timestamp.format("%Y/%m/%d %H:%M:%S");
        let head = format!("[{}] {} {}: {}", self.level.to_colored_string(), timestamp, self.position.cyan(), self.message.white());
        if self.debug_info.is_empty() {
            head
        } else {
            format!("{}\n{}", head, self.debug_info.bright_black())
        }
    }
}

impl Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}

pub fn logging_console(log_entry: &LogEntry) {
    println!("{}", log_entry.to_colored_string());
}

#[macro_export]
macro_rules! log_entry {
    ($level:expr, $position:expr, $message:expr) => {
        $crate::utils::logging::LogEntry::new($level, $position, $message, "")
    };
    ($level:expr, $position:expr, $message:expr, $debug_info:expr) => {
        $crate::utils::logging::LogEntry::new($level, $position, $message, format!("{}:{} {}", file!(), line!(), $debug_info))
    };
}

#[macro_export]
macro_rules! debug_entry {
    ($($arg:expr),+) => { $crate::log_entry!($crate::utils::logging::LogLevel::Debug, $($arg),+) };
}

#[macro_export]
macro_rules! information_entry {
    ($($arg:expr),+) => { $crate::log_entry!($crate::utils::logging::LogLevel::Information, $($arg),+) };
}

#[macro_export]
macro_rules! notice_entry {
    ($($arg:expr),+) => { $crate::log_entry!($crate::utils::logging::LogLevel::Notice, $($arg),+) };
}

#[macro_export]
macro_rules! warning_entry {
    ($($arg:expr),+) => { $crate::log_entry!($crate::utils::logging::LogLevel::Warning, $($arg),+) };
}

#[macro_export]
macro_rules! error_entry {
    ($($arg:expr),+) => { $crate::log_entry!($crate::utils::logging::LogLevel::Error, $($arg),+) };
}

#[macro_export]
macro_rules! critical_entry {
    ($($arg:expr),+) => { $crate::log_entry!($crate::utils::logging::LogLevel::Critical, $($arg),+) };
}

#[macro_export]
macro_rules! alert_entry {
    ($($arg:expr),+) => { $crate::log_entry!($crate::utils::logging::LogLevel::Alert, $($arg),+) };
}

#[macro_export]
macro_rules! emergency_entry {
    ($($arg:expr),+) => { $crate::log_entry!($crate::utils::logging::LogLevel::Emergency, $($arg),+) };
}
