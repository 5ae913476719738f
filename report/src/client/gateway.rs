use super::{CallerContext, ReportClient, decode_summaries};
use crate::models::{ChannelId, RawMetricRecord};
use async_trait::async_trait;
use common::config::ClientConfig;
use common::{Error, Result};
use http::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Calls a JSON gateway for the report service directly: one POST of the
/// summaries request to `<endpoint>/<method>` per channel. The endpoint must
/// be a full `http://` or `https://` URL.
pub struct HttpReportClient {
    client: reqwest::Client,
    url: Url,
    caller: CallerContext,
}

impl HttpReportClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let url = method_url(&config.endpoint, &config.method)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url,
            caller: CallerContext::from_config(config),
        })
    }
}

fn method_url(endpoint: &str, method: &str) -> Result<Url> {
    let mut url = Url::parse(endpoint).map_err(|e| {
        Error::InvalidInput(format!(
            "http transport needs a gateway URL as endpoint, got {:?}: {}",
            endpoint, e
        ))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidInput(format!(
            "http transport needs an http(s) gateway URL as endpoint, got {:?}",
            endpoint
        )));
    }

    let path = format!(
        "{}/{}",
        url.path().trim_end_matches('/'),
        method.trim_start_matches('/')
    );
    url.set_path(&path);
    Ok(url)
}

#[async_trait]
impl ReportClient for HttpReportClient {
    async fn summaries(&self, channel_id: &ChannelId) -> Result<RawMetricRecord> {
        let body = self.caller.request_body(channel_id)?;

        let response = self
            .client
            .post(self.url.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                Error::QueryUnavailable(format!("request for channel {} failed: {}", channel_id, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::QueryUnavailable(format!(
                "report service answered {} for channel {}",
                status, channel_id
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            Error::QueryUnavailable(format!("reading response for channel {} failed: {}", channel_id, e))
        })?;

        decode_summaries(&bytes).inspect_err(|_| {
            debug!(
                channel_id = %channel_id,
                body = %String::from_utf8_lossy(&bytes),
                "Undecodable report response"
            );
        })
    }
}
