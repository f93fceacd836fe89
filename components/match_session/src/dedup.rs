// components/match_session/src/dedup.rs
use std::collections::HashSet;

use crate::record::MatchRecord;

/// Distinct records in the order they were first seen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    records: Vec<MatchRecord>,
}

impl ResultSet {
    pub fn from_records(records: impl IntoIterator<Item = MatchRecord>) -> Self {
        let mut seen = HashSet::new();
        let records = records
            .into_iter()
            .filter(|record| seen.insert(record.dedup_key()))
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    /// One display line per record
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.records.iter().map(MatchRecord::display_line)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<MatchRecord> for ResultSet {
    fn from_iter<I: IntoIterator<Item = MatchRecord>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}
