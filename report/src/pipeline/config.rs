use crate::models::{Category, parse_channel_type};
use common::config::Settings;
use common::{Error, Result};
use std::collections::HashMap;
use std::path::PathBuf;

/// Typed view of the `[report]` settings.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Requested categories, in report order.
    pub categories: Vec<Category>,
    pub sources: HashMap<Category, PathBuf>,
    pub query_concurrency: usize,
}

impl ReportConfig {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let categories = parse_channel_type(&settings.report.channel_type)?;

        let sources = settings
            .report
            .sources
            .iter()
            .map(|(name, path)| {
                let category = name.parse::<Category>().map_err(|_| {
                    Error::InvalidInput(format!("identifier source for unknown category: {}", name))
                })?;
                Ok((category, PathBuf::from(path)))
            })
            .collect::<Result<HashMap<_, _>>>()?;

        Ok(Self {
            categories,
            sources,
            query_concurrency: settings.report.query_concurrency.max(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let config = ReportConfig::from_settings(&Settings::default()).unwrap();

        assert_eq!(config.categories, Category::ALL.to_vec());
        assert_eq!(config.sources.get(&Category::Hero), Some(&PathBuf::from("hero")));
        assert_eq!(config.sources.len(), 3);
        assert_eq!(config.query_concurrency, 1);
    }

    #[test]
    fn test_single_category() {
        let settings = Settings::default()
            .with_channel_type("seller")
            .with_source("seller", "/data/sellers.txt");
        let config = ReportConfig::from_settings(&settings).unwrap();

        assert_eq!(config.categories, vec![Category::Seller]);
        assert_eq!(
            config.sources.get(&Category::Seller),
            Some(&PathBuf::from("/data/sellers.txt"))
        );
    }

    #[test]
    fn test_rejects_unknown_names() {
        let settings = Settings::default().with_channel_type("everything");
        assert!(ReportConfig::from_settings(&settings).is_err());

        let settings = Settings::default().with_source("vip", "vip.txt");
        assert!(matches!(
            ReportConfig::from_settings(&settings),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_zero_concurrency_is_sequential() {
        let mut settings = Settings::default();
        settings.report.query_concurrency = 0;
        assert_eq!(ReportConfig::from_settings(&settings).unwrap().query_concurrency, 1);
    }
}
