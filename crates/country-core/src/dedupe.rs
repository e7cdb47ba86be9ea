//! Stable deduplication by country name.

use std::collections::HashSet;

use crate::record::CountryRecord;

/// Outcome of a deduplication pass.
#[derive(Debug, Clone, Default)]
pub struct DedupReport {
    /// One record per name, in first-seen order.
    pub retained: Vec<CountryRecord>,
    /// Names of the later occurrences that were dropped.
    pub dropped: Vec<String>,
}

/// Keep the first record for each name, preserving order.
pub fn dedupe_by_name(records: impl IntoIterator<Item = CountryRecord>) -> Vec<CountryRecord> {
    dedupe_report(records).retained
}

/// Deduplicate and report which names were collapsed.
pub fn dedupe_report(records: impl IntoIterator<Item = CountryRecord>) -> DedupReport {
    let mut seen = HashSet::new();
    let mut report = DedupReport::default();

    for record in records {
        if seen.insert(record.name.clone()) {
            report.retained.push(record);
        } else {
            report.dropped.push(record.name);
        }
    }

    report
}
