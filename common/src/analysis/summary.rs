use crate::analysis::aggregator::{bucketize, check_range, in_range, mean_count, Timestamped};
use crate::analysis::bucket_frequency::BucketFrequency;
use crate::utils::log_entry::analysis::AnalysisEntry;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub struct Summary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total: usize,
    pub daily_average: f64,
    pub hourly_average: f64,
    pub weekly_average: f64,
}

// Hourly average: per day over the hours between its first and last event,
// then across days.
pub fn summarize<T: Timestamped>(events: &[T], start: NaiveDate, end: NaiveDate) -> Result<Summary, AnalysisEntry> {
    check_range(start, end)?;
    let times: Vec<NaiveDateTime> = in_range(events, start, end).collect();

    let mut per_day: BTreeMap<NaiveDate, Vec<NaiveDateTime>> = BTreeMap::new();
    for time in &times {
        per_day.entry(time.date()).or_default().push(*time);
    }
    let hourly_means: Vec<f64> = per_day
        .into_values()
        .map(|day| mean_count(&bucketize(day, BucketFrequency::Hour)))
        .collect();
    let hourly_average = if hourly_means.is_empty() {
        0.0
    } else {
        hourly_means.iter().sum::<f64>() / hourly_means.len() as f64
    };

    Ok(Summary {
        start,
        end,
        total: times.len(),
        daily_average: mean_count(&bucketize(times.iter().copied(), BucketFrequency::Day)),
        hourly_average,
        weekly_average: mean_count(&bucketize(times.iter().copied(), BucketFrequency::Week)),
    })
}
