use super::{ChannelProcessor, ReportConfig};
use crate::client::ReportClient;
use crate::models::{Category, Report};
use crate::source::IdentifierSource;
use std::sync::Arc;
use tracing::{error, info};

/// Builds a fresh report across the requested categories.
///
/// An unreadable identifier source costs only its own category; the run
/// continues with the next one. Nothing here is shared between calls, so
/// concurrent requests can each call `build` independently.
pub struct ReportBuilder {
    categories: Vec<Category>,
    source: Arc<dyn IdentifierSource>,
    processor: ChannelProcessor,
}

impl ReportBuilder {
    pub fn new(
        config: &ReportConfig,
        source: Arc<dyn IdentifierSource>,
        client: Arc<dyn ReportClient>,
    ) -> Self {
        Self {
            categories: config.categories.clone(),
            source,
            processor: ChannelProcessor::new(client, config.query_concurrency),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Report over the configured categories.
    pub async fn build(&self) -> Report {
        self.build_for(&self.categories).await
    }

    pub async fn build_for(&self, categories: &[Category]) -> Report {
        let mut report = Report::new();

        for &category in categories {
            info!(category = %category, "Processing {} channels", category);

            let channel_ids = match self.source.identifiers(category).await {
                Ok(ids) => ids,
                Err(e) => {
                    error!(category = %category, error = %e, "Error reading identifier source");
                    continue;
                }
            };

            let records = self.processor.run(category, &channel_ids).await.into_records();
            info!(
                category = %category,
                channels = channel_ids.len(),
                records = records.len(),
                "Finished {} channels",
                category
            );
            report.extend(records);
        }

        report
    }
}
