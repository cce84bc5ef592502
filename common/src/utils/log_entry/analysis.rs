use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisEntry {
    #[error("Invalid range: start {0} is after end {1}")]
    InvalidRangeError(NaiveDate, NaiveDate),
    #[error("Invalid month: {0}-{1:02}")]
    InvalidMonthError(i32, u32),
    #[error("Unknown bucket frequency: {0}")]
    UnknownFrequencyError(String),
    #[error("No events between {0} and {1}")]
    EmptyInputWarning(NaiveDate, NaiveDate),
}

impl From<AnalysisEntry> for String {
    #[inline(always)]
    fn from(value: AnalysisEntry) -> Self {
        value.to_string()
    }
}
