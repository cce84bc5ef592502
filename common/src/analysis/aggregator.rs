use crate::analysis::aggregated_bucket::AggregatedBucket;
use crate::analysis::bucket_frequency::BucketFrequency;
use crate::observation::event::Event;
use crate::utils::log_entry::analysis::AnalysisEntry;
use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, TimeZone};
use std::collections::BTreeMap;

/// Anything that carries a wall-clock time in the reference timezone.
pub trait Timestamped {
    fn local_time(&self) -> NaiveDateTime;
}

impl Timestamped for NaiveDateTime {
    fn local_time(&self) -> NaiveDateTime {
        *self
    }
}

impl<Tz: TimeZone> Timestamped for DateTime<Tz> {
    fn local_time(&self) -> NaiveDateTime {
        self.naive_local()
    }
}

impl Timestamped for Event {
    fn local_time(&self) -> NaiveDateTime {
        self.timestamp.naive_local()
    }
}

pub(crate) fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), AnalysisEntry> {
    if start > end {
        return Err(AnalysisEntry::InvalidRangeError(start, end));
    }
    Ok(())
}

pub(crate) fn in_range<T: Timestamped>(events: &[T], start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDateTime> + '_ {
    events
        .iter()
        .map(Timestamped::local_time)
        .filter(move |time| {
            let date = time.date();
            start <= date && date <= end
        })
}

/// Counts per contiguous run of buckets covering `times`. Buckets between
/// the first and last occupied bucket are filled with zero; nothing is
/// produced outside that span.
pub(crate) fn bucketize<I: IntoIterator<Item = NaiveDateTime>>(times: I, freq: BucketFrequency) -> Vec<AggregatedBucket> {
    let mut counts: BTreeMap<NaiveDateTime, usize> = BTreeMap::new();
    for time in times {
        *counts.entry(freq.floor(time)).or_insert(0) += 1;
    }
    let (first, last) = match (counts.keys().next(), counts.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };
    let mut buckets = Vec::new();
    let mut cursor = Some(first);
    while let Some(bucket_start) = cursor {
        if bucket_start > last {
            break;
        }
        buckets.push(AggregatedBucket::new(bucket_start, counts.get(&bucket_start).copied().unwrap_or(0)));
        cursor = freq.next(bucket_start);
    }
    buckets
}

pub(crate) fn mean_count(buckets: &[AggregatedBucket]) -> f64 {
    if buckets.is_empty() {
        return 0.0;
    }
    let total: usize = buckets.iter().map(|bucket| bucket.count).sum();
    total as f64 / buckets.len() as f64
}

pub fn aggregate<T: Timestamped>(events: &[T], start: NaiveDate, end: NaiveDate, freq: BucketFrequency) -> Result<Vec<AggregatedBucket>, AnalysisEntry> {
    check_range(start, end)?;
    Ok(bucketize(in_range(events, start, end), freq))
}

/// Mean bucket count over the buckets [`aggregate`] would return, or `0.0`
/// when there are none.
pub fn average<T: Timestamped>(events: &[T], start: NaiveDate, end: NaiveDate, freq: BucketFrequency) -> Result<f64, AnalysisEntry> {
    let buckets = aggregate(events, start, end, freq)?;
    Ok(mean_count(&buckets))
}

pub fn month_range(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), AnalysisEntry> {
    let invalid = || AnalysisEntry::InvalidMonthError(year, month);
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(invalid)?;
    Ok((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn daily_counts_for_two_days() {
        let events = vec![time(2024, 4, 11, 10), time(2024, 4, 11, 14), time(2024, 4, 12, 9)];
        let buckets = aggregate(&events, date(2024, 4, 11), date(2024, 4, 12), BucketFrequency::Day).unwrap();
        assert_eq!(buckets, vec![AggregatedBucket::new(time(2024, 4, 11, 0), 2), AggregatedBucket::new(time(2024, 4, 12, 0), 1)]);
    }

    #[test]
    fn end_date_is_inclusive_for_the_whole_day() {
        let events = vec![time(2024, 4, 30, 23)];
        let buckets = aggregate(&events, date(2024, 4, 11), date(2024, 4, 30), BucketFrequency::Day).unwrap();
        assert_eq!(buckets.len(), 1);
    }

    #[test]
    fn events_outside_range_are_ignored() {
        let events = vec![time(2024, 4, 10, 23), time(2024, 4, 11, 1), time(2024, 4, 13, 0)];
        let buckets = aggregate(&events, date(2024, 4, 11), date(2024, 4, 12), BucketFrequency::Day).unwrap();
        assert_eq!(buckets, vec![AggregatedBucket::new(time(2024, 4, 11, 0), 1)]);
    }

    #[test]
    fn gaps_between_events_are_zero_filled() {
        let events = vec![time(2024, 4, 11, 8), time(2024, 4, 11, 11)];
        let buckets = aggregate(&events, date(2024, 4, 1), date(2024, 4, 30), BucketFrequency::Hour).unwrap();
        let counts: Vec<usize> = buckets.iter().map(|bucket| bucket.count).collect();
        assert_eq!(counts, vec![1, 0, 0, 1]);
        assert_eq!(buckets[0].start, time(2024, 4, 11, 8));
    }

    #[test]
    fn unsorted_input_gives_ordered_buckets() {
        let events = vec![time(2024, 6, 3, 0), time(2024, 4, 11, 0), time(2024, 5, 20, 0)];
        let buckets = aggregate(&events, date(2024, 1, 1), date(2024, 12, 31), BucketFrequency::Month).unwrap();
        let starts: Vec<NaiveDateTime> = buckets.iter().map(|bucket| bucket.start).collect();
        assert_eq!(starts, vec![time(2024, 4, 1, 0), time(2024, 5, 1, 0), time(2024, 6, 1, 0)]);
    }

    #[test]
    fn weekly_buckets_start_on_monday() {
        // Sunday 2024-04-14 and Monday 2024-04-15 fall in different weeks.
        let events = vec![time(2024, 4, 14, 12), time(2024, 4, 15, 12), time(2024, 4, 16, 12)];
        let buckets = aggregate(&events, date(2024, 4, 1), date(2024, 4, 30), BucketFrequency::Week).unwrap();
        assert_eq!(buckets, vec![AggregatedBucket::new(time(2024, 4, 8, 0), 1), AggregatedBucket::new(time(2024, 4, 15, 0), 2)]);
    }

    #[test]
    fn yearly_buckets() {
        let events = vec![time(2023, 12, 31, 23), time(2024, 1, 1, 0)];
        let buckets = aggregate(&events, date(2023, 1, 1), date(2024, 12, 31), BucketFrequency::Year).unwrap();
        assert_eq!(buckets, vec![AggregatedBucket::new(time(2023, 1, 1, 0), 1), AggregatedBucket::new(time(2024, 1, 1, 0), 1)]);
    }

    #[test]
    fn start_after_end_is_rejected() {
        let events = vec![time(2024, 4, 11, 10)];
        let result = aggregate(&events, date(2024, 5, 1), date(2024, 4, 1), BucketFrequency::Day);
        assert_eq!(result, Err(AnalysisEntry::InvalidRangeError(date(2024, 5, 1), date(2024, 4, 1))));
        assert!(average(&events, date(2024, 5, 1), date(2024, 4, 1), BucketFrequency::Day).is_err());
    }

    #[test]
    fn average_of_nothing_is_zero() {
        let events: Vec<NaiveDateTime> = Vec::new();
        assert_eq!(average(&events, date(2024, 4, 1), date(2024, 4, 30), BucketFrequency::Day), Ok(0.0));
    }

    #[test]
    fn average_includes_zero_buckets() {
        let events = vec![time(2024, 4, 11, 10), time(2024, 4, 11, 11), time(2024, 4, 13, 10)];
        let mean = average(&events, date(2024, 4, 1), date(2024, 4, 30), BucketFrequency::Day).unwrap();
        assert!((mean - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zoned_timestamps_use_local_wall_clock() {
        let eastern = FixedOffset::west_opt(4 * 3600).unwrap();
        let late = eastern.with_ymd_and_hms(2024, 4, 11, 22, 30, 0).unwrap();
        let buckets = aggregate(&[late], date(2024, 4, 11), date(2024, 4, 11), BucketFrequency::Day).unwrap();
        assert_eq!(buckets, vec![AggregatedBucket::new(time(2024, 4, 11, 0), 1)]);
    }

    #[test]
    fn month_range_covers_whole_month() {
        assert_eq!(month_range(2024, 2), Ok((date(2024, 2, 1), date(2024, 2, 29))));
        assert_eq!(month_range(2023, 12), Ok((date(2023, 12, 1), date(2023, 12, 31))));
        assert_eq!(month_range(2024, 13), Err(AnalysisEntry::InvalidMonthError(2024, 13)));
    }
}
