use crate::utils::log_entry::analysis::AnalysisEntry;
use chrono::{Datelike, Duration, Months, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Calendar bucket widths. Weeks start on Monday.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum BucketFrequency {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl BucketFrequency {
    pub fn floor(&self, time: NaiveDateTime) -> NaiveDateTime {
        let date = time.date();
        match self {
            BucketFrequency::Hour => date.and_time(NaiveTime::MIN) + Duration::hours(time.hour() as i64),
            BucketFrequency::Day => date.and_time(NaiveTime::MIN),
            BucketFrequency::Week => {
                let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
                monday.and_time(NaiveTime::MIN)
            }
            BucketFrequency::Month => (date - Duration::days(date.day0() as i64)).and_time(NaiveTime::MIN),
            BucketFrequency::Year => (date - Duration::days(date.ordinal0() as i64)).and_time(NaiveTime::MIN),
        }
    }

    pub fn next(&self, bucket_start: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            BucketFrequency::Hour => bucket_start.checked_add_signed(Duration::hours(1)),
            BucketFrequency::Day => bucket_start.checked_add_signed(Duration::days(1)),
            BucketFrequency::Week => bucket_start.checked_add_signed(Duration::weeks(1)),
            BucketFrequency::Month => bucket_start.checked_add_months(Months::new(1)),
            BucketFrequency::Year => bucket_start.checked_add_months(Months::new(12)),
        }
    }
}

impl FromStr for BucketFrequency {
    type Err = AnalysisEntry;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "h" | "hour" | "hourly" => Ok(BucketFrequency::Hour),
            "d" | "day" | "daily" => Ok(BucketFrequency::Day),
            "w" | "week" | "weekly" => Ok(BucketFrequency::Week),
            "m" | "month" | "monthly" => Ok(BucketFrequency::Month),
            "y" | "year" | "yearly" => Ok(BucketFrequency::Year),
            _ => Err(AnalysisEntry::UnknownFrequencyError(s.to_string())),
        }
    }
}

impl TryFrom<String> for BucketFrequency {
    type Error = AnalysisEntry;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Display for BucketFrequency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BucketFrequency::Hour => "hour",
            BucketFrequency::Day => "day",
            BucketFrequency::Week => "week",
            BucketFrequency::Month => "month",
            BucketFrequency::Year => "year",
        };
        write!(f, "{}", name)
    }
}
