mod file;

pub use file::FileIdentifierSource;

use crate::models::{Category, ChannelId};
use async_trait::async_trait;
use common::Result;

/// Supplies the ordered channel list for a category. Failures are reported
/// as `SourceUnavailable` and only cost that one category.
#[async_trait]
pub trait IdentifierSource: Send + Sync {
    async fn identifiers(&self, category: Category) -> Result<Vec<ChannelId>>;
}
