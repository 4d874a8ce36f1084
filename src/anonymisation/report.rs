//! Run summary for an anonymisation pass

use crate::anonymisation::{
    classifier::PseudonymCategory, engine::TransformStats, registry::PseudonymRegistry,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counters describing one anonymisation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymisationReport {
    /// Source document
    pub source: String,

    /// Records before limiting (absent when the document has no records list)
    pub records_in: Option<usize>,

    /// Records kept
    pub records_kept: Option<usize>,

    /// List fields cut down to their first element
    pub lists_truncated: usize,

    /// String leaves replaced
    pub strings_replaced: usize,

    /// Distinct originals per category
    pub distinct_by_category: BTreeMap<PseudonymCategory, usize>,
}

impl AnonymisationReport {
    /// Build a report from the transform counters and the registry
    pub fn new(
        source: impl Into<String>,
        stats: TransformStats,
        registry: &PseudonymRegistry,
    ) -> Self {
        let distinct_by_category = PseudonymCategory::ALL
            .into_iter()
            .map(|category| (category, registry.len_for(category)))
            .collect();

        Self {
            source: source.into(),
            records_in: stats.records_in,
            records_kept: stats.records_kept,
            lists_truncated: stats.lists_truncated,
            strings_replaced: stats.strings_replaced,
            distinct_by_category,
        }
    }

    /// Total distinct originals across all categories
    pub fn total_distinct(&self) -> usize {
        self.distinct_by_category.values().sum()
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                    ANONYMISATION SUMMARY                      \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str(&format!("  Source:                 {}\n", self.source));

        match (self.records_in, self.records_kept) {
            (Some(total), Some(kept)) => {
                output.push_str(&format!("  Records Kept:           {kept} of {total}\n"));
            }
            _ => output.push_str("  Records Kept:           (no records list)\n"),
        }

        output.push_str(&format!("  Lists Truncated:        {}\n", self.lists_truncated));
        output.push_str(&format!("  Strings Replaced:       {}\n", self.strings_replaced));
        output.push_str(&format!("  Distinct Pseudonyms:    {}\n", self.total_distinct()));
        output.push('\n');

        for (category, count) in &self.distinct_by_category {
            output.push_str(&format!("    {:<10} {:>6}\n", category.prefix(), count));
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
