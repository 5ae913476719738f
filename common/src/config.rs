use config::{Config, ConfigError};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportSettings {
    /// `hero`, `kol`, `seller` or `all`.
    #[serde(default = "default_channel_type")]
    pub channel_type: String,
    /// Category name -> identifier file.
    #[serde(default = "default_sources")]
    pub sources: HashMap<String, String>,
    #[serde(default = "default_query_concurrency")]
    pub query_concurrency: usize,
}

/// `grpcurl` talks gRPC to `endpoint` as a bare `host:port`. `http` posts
/// JSON and needs `endpoint` to be the URL of a JSON gateway in front of the
/// report service.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Http,
    #[default]
    Grpcurl,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    #[serde(default)]
    pub transport: Transport,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_grpcurl_path")]
    pub grpcurl_path: String,
    #[serde(default = "default_caller_tribe")]
    pub caller_tribe: String,
    #[serde(default = "default_caller_squad")]
    pub caller_squad: String,
    #[serde(default = "default_user_id")]
    pub user_id: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            channel_type: default_channel_type(),
            sources: default_sources(),
            query_concurrency: default_query_concurrency(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            endpoint: default_endpoint(),
            method: default_method(),
            timeout_secs: default_timeout_secs(),
            grpcurl_path: default_grpcurl_path(),
            caller_tribe: default_caller_tribe(),
            caller_squad: default_caller_squad(),
            user_id: default_user_id(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_channel_type() -> String {
    "all".to_string()
}

fn default_sources() -> HashMap<String, String> {
    ["hero", "kol", "seller"]
        .into_iter()
        .map(|name| (name.to_string(), name.to_string()))
        .collect()
}

fn default_query_concurrency() -> usize {
    1
}

fn default_endpoint() -> String {
    "broadcaster-report-grpc.gke-infra-production-asia-southeast1-main-production.k8s:50051"
        .to_string()
}

fn default_method() -> String {
    "broadcaster_report.Report/SummariesBulk".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_grpcurl_path() -> String {
    "grpcurl".to_string()
}

fn default_caller_tribe() -> String {
    "Content".to_string()
}

fn default_caller_squad() -> String {
    "Script".to_string()
}

fn default_user_id() -> u64 {
    32077238
}

impl Settings {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config = builder.build()?;

        if let Ok(sources) = config.get_table("report.sources") {
            debug!(?sources, "Loaded identifier sources from configuration");
        }

        let settings: Settings = config.try_deserialize()?;

        debug!(
            channel_type = %settings.report.channel_type,
            transport = ?settings.client.transport,
            endpoint = %settings.client.endpoint,
            "Parsed report settings"
        );

        Ok(settings)
    }

    pub fn with_channel_type(mut self, channel_type: &str) -> Self {
        self.report.channel_type = channel_type.to_string();
        self
    }

    pub fn with_source(mut self, category: &str, path: &str) -> Self {
        self.report
            .sources
            .insert(category.to_string(), path.to_string());
        self
    }
}
