mod grpcurl;
mod gateway;

pub use grpcurl::GrpcurlReportClient;
pub use gateway::HttpReportClient;

use crate::models::{ChannelId, RawMetricRecord};
use async_trait::async_trait;
use common::config::{ClientConfig, Transport};
use common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Runs one summaries query per channel against the report service.
#[async_trait]
pub trait ReportClient: Send + Sync {
    async fn summaries(&self, channel_id: &ChannelId) -> Result<RawMetricRecord>;
}

pub fn build_client(config: &ClientConfig) -> Result<Arc<dyn ReportClient>> {
    let client: Arc<dyn ReportClient> = match config.transport {
        Transport::Http => Arc::new(HttpReportClient::new(config)?),
        Transport::Grpcurl => Arc::new(GrpcurlReportClient::new(config)),
    };
    Ok(client)
}

/// Caller identity sent with every query.
#[derive(Debug, Clone)]
pub struct CallerContext {
    pub tribe: String,
    pub squad: String,
    pub user_id: u64,
}

impl CallerContext {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            tribe: config.caller_tribe.clone(),
            squad: config.caller_squad.clone(),
            user_id: config.user_id,
        }
    }

    pub fn request_body(&self, channel_id: &ChannelId) -> Result<String> {
        let request = SummariesRequest {
            caller_context: CallerFields {
                tribe: &self.tribe,
                squad: &self.squad,
            },
            channel_ids: [channel_id.as_str()],
            user_id: self.user_id,
        };
        Ok(serde_json::to_string(&request)?)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummariesRequest<'a> {
    caller_context: CallerFields<'a>,
    #[serde(rename = "channelIDs")]
    channel_ids: [&'a str; 1],
    #[serde(rename = "userID")]
    user_id: u64,
}

#[derive(Serialize)]
struct CallerFields<'a> {
    tribe: &'a str,
    squad: &'a str,
}

#[derive(Deserialize)]
struct SummariesResponse {
    #[serde(rename = "reportData", default)]
    report_data: Option<HashMap<String, ReportEntry>>,
}

#[derive(Deserialize)]
struct ReportEntry {
    #[serde(rename = "Channel", default)]
    channel: Option<ChannelMetrics>,
}

#[derive(Deserialize)]
struct ChannelMetrics {
    #[serde(default)]
    metrics: Option<HashMap<String, String>>,
}

/// Decodes a summaries response into one sub-record per report entry.
///
/// Missing `reportData`, `Channel` or `metrics` fields yield empty results;
/// a body of any other shape is a `Decode` error.
pub fn decode_summaries(body: &[u8]) -> Result<RawMetricRecord> {
    let response: SummariesResponse =
        serde_json::from_slice(body).map_err(|e| Error::Decode(e.to_string()))?;

    let sub_records = response
        .report_data
        .unwrap_or_default()
        .into_values()
        .map(|entry| {
            entry
                .channel
                .and_then(|channel| channel.metrics)
                .unwrap_or_default()
        })
        .collect();

    Ok(RawMetricRecord::new(sub_records))
}
