use crate::models::{AggregatedMetrics, RawMetricRecord};
use common::{Error, Result};
use std::collections::BTreeMap;

/// Sums every metric across all sub-records of one response.
///
/// Values must be base-10 `i64` strings. Partial sums are kept in `i128`
/// and only the final total per key has to fit in `i64`, so the outcome does
/// not depend on sub-record order. A malformed value or an out-of-range
/// total fails the whole record; nothing is skipped and nothing saturates.
pub fn aggregate(record: &RawMetricRecord) -> Result<AggregatedMetrics> {
    let mut totals: BTreeMap<&str, i128> = BTreeMap::new();

    for sub_record in &record.sub_records {
        for (key, raw) in sub_record {
            let value = raw.parse::<i64>().map_err(|e| Error::Aggregation {
                key: key.clone(),
                value: raw.clone(),
                reason: e.to_string(),
            })?;

            *totals.entry(key.as_str()).or_insert(0) += i128::from(value);
        }
    }

    totals
        .into_iter()
        .map(|(key, total)| {
            i64::try_from(total)
                .map(|total| (key, total))
                .map_err(|_| Error::Aggregation {
                    key: key.to_string(),
                    value: total.to_string(),
                    reason: "total outside the 64-bit integer range".to_string(),
                })
        })
        .collect()
}
