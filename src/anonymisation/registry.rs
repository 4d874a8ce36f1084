//! Run-scoped pseudonym registry
//!
//! Holds one table per [`PseudonymCategory`]. Tokens are `<prefix><n>` with
//! `n` counting distinct originals from 1 within that category. A registry
//! lives for one run; nothing is persisted.

use crate::anonymisation::classifier::PseudonymCategory;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Memoised original-to-token tables for one anonymisation run
#[derive(Debug, Clone, Default)]
pub struct PseudonymRegistry {
    tables: HashMap<PseudonymCategory, IndexMap<String, String>>,
}

/// A single registry entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PseudonymEntry<'a> {
    /// Category the original was classified into
    pub category: PseudonymCategory,
    /// Original string value
    pub original: &'a str,
    /// Token that replaced it
    pub token: &'a str,
}

impl PseudonymRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Token for `value` in `category`, minting the next one on first sight
    pub fn pseudonym(&mut self, category: PseudonymCategory, value: &str) -> String {
        let table = self.tables.entry(category).or_default();
        if let Some(token) = table.get(value) {
            return token.clone();
        }

        let token = format!("{}{}", category.prefix(), table.len() + 1);
        table.insert(value.to_string(), token.clone());
        token
    }

    /// Previously minted token, if any
    pub fn get(&self, category: PseudonymCategory, value: &str) -> Option<&str> {
        self.tables
            .get(&category)
            .and_then(|table| table.get(value))
            .map(String::as_str)
    }

    /// Number of distinct originals seen in a category
    pub fn len_for(&self, category: PseudonymCategory) -> usize {
        self.tables.get(&category).map_or(0, IndexMap::len)
    }

    /// Number of distinct originals across all categories
    pub fn len(&self) -> usize {
        self.tables.values().map(IndexMap::len).sum()
    }

    /// True when no pseudonym has been minted
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries, grouped by category in priority order, then by mint order
    pub fn entries(&self) -> impl Iterator<Item = PseudonymEntry<'_>> + '_ {
        PseudonymCategory::ALL.into_iter().flat_map(move |category| {
            self.tables
                .get(&category)
                .into_iter()
                .flat_map(move |table| {
                    table.iter().map(move |(original, token)| PseudonymEntry {
                        category,
                        original: original.as_str(),
                        token: token.as_str(),
                    })
                })
        })
    }
}
