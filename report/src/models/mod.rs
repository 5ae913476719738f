mod category;
mod metrics;
mod summary;

pub use category::{Category, ChannelId, parse_channel_type};
pub use metrics::{AggregatedMetrics, RawMetricRecord, SubRecord};
pub use summary::{Report, SummaryRecord};
