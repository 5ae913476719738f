use crate::client::{ReportClient, build_client};
use crate::models::{Category, Report, parse_channel_type};
use crate::pipeline::{ReportBuilder, ReportConfig};
use crate::source::{FileIdentifierSource, IdentifierSource};
use common::Result;
use common::config::Settings;
use std::sync::Arc;

pub struct ReportService {
    builder: ReportBuilder,
}

impl ReportService {
    pub fn new(
        config: &ReportConfig,
        source: Arc<dyn IdentifierSource>,
        client: Arc<dyn ReportClient>,
    ) -> Self {
        Self {
            builder: ReportBuilder::new(config, source, client),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let config = ReportConfig::from_settings(settings)?;
        let source = Arc::new(FileIdentifierSource::new(config.sources.clone()));
        let client = build_client(&settings.client)?;

        Ok(Self::new(&config, source, client))
    }

    pub fn categories(&self) -> &[Category] {
        self.builder.categories()
    }

    /// Builds a new report. `channel_type` overrides the configured
    /// categories for this call only; an unknown value is rejected before
    /// any query runs.
    pub async fn generate(&self, channel_type: Option<&str>) -> Result<Report> {
        let report = match channel_type {
            Some(value) => {
                let categories = parse_channel_type(value)?;
                self.builder.build_for(&categories).await
            }
            None => self.builder.build().await,
        };
        Ok(report)
    }
}
