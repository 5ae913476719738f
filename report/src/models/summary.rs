use super::{AggregatedMetrics, Category, ChannelId};
use serde::Serialize;

/// What the rendering layer gets for one processed channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRecord {
    pub title: String,
    pub category: Category,
    pub channel_id: ChannelId,
    pub metrics: AggregatedMetrics,
}

impl SummaryRecord {
    pub fn new(category: Category, channel_id: ChannelId, metrics: AggregatedMetrics) -> Self {
        Self {
            title: format!("{} - {}", category, channel_id),
            category,
            channel_id,
            metrics,
        }
    }
}

/// Summary records in display order: category order as requested, then
/// source-list order within a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub records: Vec<SummaryRecord>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, records: Vec<SummaryRecord>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.title.as_str()).collect()
    }
}
