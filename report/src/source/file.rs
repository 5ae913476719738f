use super::IdentifierSource;
use crate::models::{Category, ChannelId};
use async_trait::async_trait;
use common::{Error, Result};
use std::collections::HashMap;
use std::path::PathBuf;

/// Reads one identifier per line from a file per category. The file is read
/// again on every call.
#[derive(Debug, Clone, Default)]
pub struct FileIdentifierSource {
    paths: HashMap<Category, PathBuf>,
}

impl FileIdentifierSource {
    pub fn new(paths: HashMap<Category, PathBuf>) -> Self {
        Self { paths }
    }

    pub fn with_path(mut self, category: Category, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(category, path.into());
        self
    }
}

fn parse_lines(contents: &str) -> Vec<ChannelId> {
    contents
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(ChannelId::new)
        .collect()
}

#[async_trait]
impl IdentifierSource for FileIdentifierSource {
    async fn identifiers(&self, category: Category) -> Result<Vec<ChannelId>> {
        let path = self.paths.get(&category).ok_or_else(|| Error::SourceUnavailable {
            category: category.to_string(),
            reason: "no identifier file configured".to_string(),
        })?;

        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::SourceUnavailable {
                category: category.to_string(),
                reason: format!("{}: {}", path.display(), e),
            })?;

        Ok(parse_lines(&contents))
    }
}
