use super::{CallerContext, ReportClient, decode_summaries};
use crate::models::{ChannelId, RawMetricRecord};
use async_trait::async_trait;
use common::config::ClientConfig;
use common::{Error, Result};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Queries through the `grpcurl` command line tool, one process per channel.
pub struct GrpcurlReportClient {
    program: PathBuf,
    endpoint: String,
    method: String,
    timeout: Duration,
    caller: CallerContext,
}

impl GrpcurlReportClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            program: PathBuf::from(&config.grpcurl_path),
            endpoint: config.endpoint.clone(),
            method: config.method.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            caller: CallerContext::from_config(config),
        }
    }

    fn command(&self, body: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(["-format", "json", "-plaintext", "-d"])
            .arg(body)
            .arg(&self.endpoint)
            .arg(&self.method)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        command
    }
}

#[async_trait]
impl ReportClient for GrpcurlReportClient {
    async fn summaries(&self, channel_id: &ChannelId) -> Result<RawMetricRecord> {
        let body = self.caller.request_body(channel_id)?;
        let mut command = self.command(&body);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Err(_) => {
                return Err(Error::QueryUnavailable(format!(
                    "grpcurl timed out after {:?} for channel {}",
                    self.timeout, channel_id
                )));
            }
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::QueryUnavailable(format!(
                    "{} not found",
                    self.program.display()
                )));
            }
            Ok(Err(e)) => {
                return Err(Error::QueryUnavailable(format!(
                    "failed to run {}: {}",
                    self.program.display(),
                    e
                )));
            }
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            return Err(Error::QueryUnavailable(format!(
                "grpcurl exited with {} for channel {}: {}",
                output.status,
                channel_id,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        decode_summaries(&output.stdout).inspect_err(|_| {
            debug!(
                channel_id = %channel_id,
                stdout = %String::from_utf8_lossy(&output.stdout),
                "Undecodable grpcurl output"
            );
        })
    }
}
