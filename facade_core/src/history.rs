//! # Analysis History
//!
//! Bounded rolling record of recent analyses, newest first.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::calculations::AnalysisReport;

/// Entries kept before the oldest is dropped
pub const HISTORY_CAPACITY: usize = 12;

/// Summary of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Profile id the run was made under
    pub profile: String,
    pub stability_index: f64,
    pub assembly_suitability: f64,
    /// Why the run happened
    pub remark: String,
}

impl HistoryEntry {
    pub fn from_report(profile: impl Into<String>, report: &AnalysisReport, remark: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            profile: profile.into(),
            stability_index: report.structural.stability_index,
            assembly_suitability: report.corrections.assembly_suitability,
            remark: remark.into(),
        }
    }
}

/// Rolling history capped at [`HISTORY_CAPACITY`] entries.
///
/// Serializes as a newest-first array. Deserializing keeps the first
/// [`HISTORY_CAPACITY`] entries of the array.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnalysisHistory {
    entries: VecDeque<HistoryEntry>,
}

impl From<Vec<HistoryEntry>> for AnalysisHistory {
    /// Entries are taken as newest first.
    fn from(entries: Vec<HistoryEntry>) -> Self {
        let mut entries = VecDeque::from(entries);
        entries.truncate(HISTORY_CAPACITY);
        Self { entries }
    }
}

impl<'de> Deserialize<'de> for AnalysisHistory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<HistoryEntry>::deserialize(deserializer).map(Self::from)
    }
}

impl AnalysisHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front, dropping the oldest entry when full.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Entries, newest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{analyze, test_support::east_atrium};

    fn entry(remark: &str) -> HistoryEntry {
        HistoryEntry::from_report("DX-01", &analyze(&east_atrium()), remark)
    }

    #[test]
    fn test_entry_copies_headline_values() {
        let e = entry("first");
        assert_eq!(e.profile, "DX-01");
        assert_eq!(e.stability_index, 96.56);
        assert_eq!(e.assembly_suitability, 98.7);
        assert_ne!(e.id, entry("second").id);
    }

    #[test]
    fn test_newest_first() {
        let mut history = AnalysisHistory::new();
        history.push(entry("a"));
        history.push(entry("b"));
        assert_eq!(history.latest().unwrap().remark, "b");
        let remarks: Vec<&str> = history.iter().map(|e| e.remark.as_str()).collect();
        assert_eq!(remarks, vec!["b", "a"]);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut history = AnalysisHistory::new();
        for i in 0..15 {
            history.push(entry(&format!("run {}", i)));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.latest().unwrap().remark, "run 14");
        assert_eq!(history.iter().last().unwrap().remark, "run 3");
    }

    #[test]
    fn test_serializes_as_array() {
        let mut history = AnalysisHistory::new();
        history.push(entry("a"));
        let json = serde_json::to_value(&history).unwrap();
        assert!(json.is_array());
        assert!(json[0].get("assemblySuitability").is_some());
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_deserialize_round_trip() {
        let mut history = AnalysisHistory::new();
        history.push(entry("a"));
        history.push(entry("b"));
        let json = serde_json::to_string(&history).unwrap();
        let back: AnalysisHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }

    #[test]
    fn test_deserialize_enforces_capacity() {
        let entries: Vec<HistoryEntry> = (0..20).map(|i| entry(&format!("run {}", i))).collect();
        let json = serde_json::to_string(&entries).unwrap();

        let history: AnalysisHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.latest().unwrap().remark, "run 0");
        assert_eq!(history.iter().last().unwrap().remark, "run 11");
    }
}
