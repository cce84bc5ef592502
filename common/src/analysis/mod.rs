pub mod aggregated_bucket;
pub mod aggregator;
pub mod bucket_frequency;
pub mod summary;

pub use aggregated_bucket::AggregatedBucket;
pub use aggregator::{aggregate, average, month_range, Timestamped};
pub use bucket_frequency::BucketFrequency;
pub use summary::{summarize, Summary};
