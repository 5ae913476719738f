use serde::ser::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// One partition of a report response: metric key -> decimal string.
pub type SubRecord = HashMap<String, String>;

/// Decoded response of one query. Zero sub-records is a valid, empty result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMetricRecord {
    pub sub_records: Vec<SubRecord>,
}

impl RawMetricRecord {
    pub fn new(sub_records: Vec<SubRecord>) -> Self {
        Self { sub_records }
    }

    pub fn is_empty(&self) -> bool {
        self.sub_records.is_empty()
    }
}

/// Per-key totals across every sub-record of one response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedMetrics(BTreeMap<String, i64>);

impl AggregatedMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.0.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries sorted by metric key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(key, value)| (key.as_str(), *value))
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for AggregatedMetrics {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// Totals go out as decimal strings, the same representation the report
// service uses for its metric values.
impl Serialize for AggregatedMetrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(key, value)| (key, value.to_string())))
    }
}
