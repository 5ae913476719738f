use super::aggregate;
use crate::client::ReportClient;
use crate::models::{AggregatedMetrics, Category, ChannelId, SummaryRecord};
use common::{Error, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{debug, error};

/// Terminal state of one category run.
#[derive(Debug)]
pub enum CategoryOutcome {
    Done(Vec<SummaryRecord>),
    /// The first failing channel; everything gathered for the category
    /// before it has been dropped.
    Aborted { channel_id: ChannelId, error: Error },
}

impl CategoryOutcome {
    pub fn into_records(self) -> Vec<SummaryRecord> {
        match self {
            CategoryOutcome::Done(records) => records,
            CategoryOutcome::Aborted { .. } => Vec::new(),
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, CategoryOutcome::Aborted { .. })
    }
}

/// Queries and aggregates every channel of one category.
///
/// The first query or aggregation failure aborts the category: no further
/// channels are started and the records already built are discarded, so a
/// category is either reported in full or not at all. With
/// `concurrency > 1` up to that many queries run ahead of the one being
/// collected; output order always follows input order.
pub struct ChannelProcessor {
    client: Arc<dyn ReportClient>,
    concurrency: usize,
}

impl ChannelProcessor {
    pub fn new(client: Arc<dyn ReportClient>, concurrency: usize) -> Self {
        Self {
            client,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn run(&self, category: Category, channel_ids: &[ChannelId]) -> CategoryOutcome {
        let result: std::result::Result<Vec<SummaryRecord>, (ChannelId, Error)> =
            stream::iter(channel_ids.iter().cloned())
                .map(|channel_id| self.process_one(category, channel_id))
                .buffered(self.concurrency)
                .try_collect()
                .await;

        match result {
            Ok(records) => CategoryOutcome::Done(records),
            Err((channel_id, error)) => {
                error!(
                    category = %category,
                    channel_id = %channel_id,
                    error = %error,
                    "Dropping all {} records: channel processing failed",
                    category
                );
                CategoryOutcome::Aborted { channel_id, error }
            }
        }
    }

    async fn process_one(
        &self,
        category: Category,
        channel_id: ChannelId,
    ) -> std::result::Result<SummaryRecord, (ChannelId, Error)> {
        match self.summarize(&channel_id).await {
            Ok(metrics) => {
                debug!(
                    category = %category,
                    channel_id = %channel_id,
                    metrics = metrics.len(),
                    "Channel summarized"
                );
                Ok(SummaryRecord::new(category, channel_id, metrics))
            }
            Err(e) => Err((channel_id, e)),
        }
    }

    async fn summarize(&self, channel_id: &ChannelId) -> Result<AggregatedMetrics> {
        let raw = self.client.summaries(channel_id).await?;
        aggregate(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StaticReportClient, sub};

    fn ids(values: &[&str]) -> Vec<ChannelId> {
        values.iter().map(|v| ChannelId::new(*v)).collect()
    }

    #[tokio::test]
    async fn test_builds_records_in_input_order() {
        let client = Arc::new(
            StaticReportClient::default()
                .with(
                    "101",
                    vec![
                        sub(&[("add_to_cart", "3")]),
                        sub(&[("add_to_cart", "2"), ("wishlist", "1")]),
                    ],
                )
                .with("102", vec![]),
        );
        let processor = ChannelProcessor::new(client.clone(), 1);

        let records = processor
            .run(Category::Hero, &ids(&["101", "102"]))
            .await
            .into_records();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "hero - 101");
        assert_eq!(records[0].metrics.get("add_to_cart"), Some(5));
        assert_eq!(records[0].metrics.get("wishlist"), Some(1));
        assert_eq!(records[1].title, "hero - 102");
        assert!(records[1].metrics.is_empty());
        assert_eq!(client.calls(), vec!["101", "102"]);
    }

    #[tokio::test]
    async fn test_query_failure_drops_whole_category() {
        let client = Arc::new(
            StaticReportClient::default()
                .with("A", vec![sub(&[("visit_shop", "1")])])
                .with("C", vec![sub(&[("visit_shop", "1")])]),
        );
        let processor = ChannelProcessor::new(client.clone(), 1);

        let outcome = processor.run(Category::Kol, &ids(&["A", "B", "C"])).await;

        match &outcome {
            CategoryOutcome::Aborted { channel_id, error } => {
                assert_eq!(channel_id.as_str(), "B");
                assert!(matches!(error, Error::QueryUnavailable(_)));
            }
            other => panic!("expected aborted category, got {:?}", other),
        }
        assert!(outcome.into_records().is_empty());
        // C is never attempted
        assert_eq!(client.calls(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_malformed_metric_drops_whole_category() {
        let client = Arc::new(
            StaticReportClient::default()
                .with("1", vec![sub(&[("like_channel", "4")])])
                .with("2", vec![sub(&[("like_channel", "abc")])])
                .with("3", vec![sub(&[("like_channel", "4")])]),
        );
        let processor = ChannelProcessor::new(client.clone(), 1);

        let outcome = processor.run(Category::Seller, &ids(&["1", "2", "3"])).await;

        assert!(outcome.is_aborted());
        assert!(outcome.into_records().is_empty());
        assert_eq!(client.calls(), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_duplicates_processed_independently() {
        let client =
            Arc::new(StaticReportClient::default().with("9", vec![sub(&[("visit_pdp", "2")])]));
        let processor = ChannelProcessor::new(client.clone(), 1);

        let records = processor.run(Category::Hero, &ids(&["9", "9"])).await.into_records();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], records[1]);
        assert_eq!(client.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_queries_keep_order() {
        let mut client = StaticReportClient::default();
        let channels: Vec<String> = (0..20).map(|i| format!("{}", 1000 + i)).collect();
        for (i, id) in channels.iter().enumerate() {
            client = client.with(id, vec![sub(&[("visit_channel", i.to_string().as_str())])]);
        }
        let processor = ChannelProcessor::new(Arc::new(client), 8);
        let input: Vec<ChannelId> = channels.iter().map(|id| ChannelId::new(id.as_str())).collect();

        let records = processor.run(Category::Kol, &input).await.into_records();

        assert_eq!(records.len(), 20);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.channel_id, input[i]);
            assert_eq!(record.metrics.get("visit_channel"), Some(i as i64));
        }
    }

    #[tokio::test]
    async fn test_concurrent_failure_stops_within_window() {
        let channels: Vec<String> = (1..=10).map(|i| i.to_string()).collect();
        let mut client = StaticReportClient::default();
        for id in channels.iter().filter(|id| id.as_str() != "3") {
            client = client.with(id, vec![sub(&[("visit_shop", "1")])]);
        }
        let client = Arc::new(client);
        let processor = ChannelProcessor::new(client.clone(), 4);
        let input: Vec<ChannelId> = channels.iter().map(|id| ChannelId::new(id.as_str())).collect();

        let outcome = processor.run(Category::Seller, &input).await;

        match &outcome {
            CategoryOutcome::Aborted { channel_id, error } => {
                assert_eq!(channel_id.as_str(), "3");
                assert!(matches!(error, Error::QueryUnavailable(_)));
            }
            other => panic!("expected aborted category, got {:?}", other),
        }
        assert!(outcome.into_records().is_empty());

        // at most concurrency - 1 channels past the failing one are started
        let calls = client.calls();
        for id in ["1", "2", "3"] {
            assert!(calls.iter().any(|c| c == id), "{} was never queried", id);
        }
        for call in &calls {
            let n: usize = call.parse().unwrap();
            assert!(n <= 6, "channel {} queried after the category aborted", call);
        }
    }

    #[tokio::test]
    async fn test_empty_list_is_done() {
        let processor = ChannelProcessor::new(Arc::new(StaticReportClient::default()), 1);
        let outcome = processor.run(Category::Hero, &[]).await;
        assert!(!outcome.is_aborted());
        assert!(outcome.into_records().is_empty());
    }
}
