use crate::client::ReportClient;
use crate::models::{Category, ChannelId, RawMetricRecord, SubRecord};
use crate::source::IdentifierSource;
use async_trait::async_trait;
use common::{Error, Result};
use std::collections::HashMap;
use std::sync::Mutex;

pub fn sub(pairs: &[(&str, &str)]) -> SubRecord {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Answers from a fixed table; channels not in the table are unreachable.
#[derive(Default)]
pub struct StaticReportClient {
    responses: HashMap<String, Vec<SubRecord>>,
    calls: Mutex<Vec<String>>,
}

impl StaticReportClient {
    pub fn with(mut self, channel_id: &str, sub_records: Vec<SubRecord>) -> Self {
        self.responses.insert(channel_id.to_string(), sub_records);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportClient for StaticReportClient {
    async fn summaries(&self, channel_id: &ChannelId) -> Result<RawMetricRecord> {
        self.calls.lock().unwrap().push(channel_id.to_string());
        self.responses
            .get(channel_id.as_str())
            .cloned()
            .map(RawMetricRecord::new)
            .ok_or_else(|| Error::QueryUnavailable(format!("no route to {}", channel_id)))
    }
}

#[derive(Default)]
pub struct StaticIdentifierSource {
    lists: HashMap<Category, Vec<ChannelId>>,
}

impl StaticIdentifierSource {
    pub fn with(mut self, category: Category, ids: &[&str]) -> Self {
        self.lists
            .insert(category, ids.iter().map(|id| ChannelId::new(*id)).collect());
        self
    }
}

#[async_trait]
impl IdentifierSource for StaticIdentifierSource {
    async fn identifiers(&self, category: Category) -> Result<Vec<ChannelId>> {
        self.lists
            .get(&category)
            .cloned()
            .ok_or_else(|| Error::SourceUnavailable {
                category: category.to_string(),
                reason: "unreadable".to_string(),
            })
    }
}
