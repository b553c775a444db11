//! Filtering and sorting of the project catalog.
//!
//! The gallery view is always derived from the full source list and the current
//! [`FilterState`]; the source list itself is never reordered.

use crate::types::{ProjectRecord, ServiceItem};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Ordering applied to the filtered gallery.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Source order
    #[default]
    Default,
    /// Largest budget first
    Budget,
    /// Longest duration first
    Duration,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [SortOrder::Default, SortOrder::Budget, SortOrder::Duration];

    /// Label shown in the sort selector.
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Default => "Default",
            SortOrder::Budget => "Budget (high to low)",
            SortOrder::Duration => "Duration (long to short)",
        }
    }
}

/// Current gallery filter selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// A category name or [`ALL_CATEGORIES`]
    pub active_category: String,
    /// Free text; empty means no text filter
    pub search_query: String,
    pub sort_order: SortOrder,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            active_category: ALL_CATEGORIES.to_string(),
            search_query: String::new(),
            sort_order: SortOrder::Default,
        }
    }
}

impl FilterState {
    /// Back to "all", no query and source order.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Numeric magnitude of a human-formatted figure such as "$120k" or "6 weeks".
///
/// Every non-digit character is discarded and the remaining digits are read as one
/// decimal number, so "$1,000k" is 1000. Strings without digits are 0 and overlong
/// digit runs saturate at `u64::MAX`.
pub fn magnitude(formatted: &str) -> u64 {
    formatted
        .chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0u64, |acc, digit| acc.saturating_mul(10).saturating_add(u64::from(digit)))
}

fn category_matches(category: &str, active: &str) -> bool {
    active == ALL_CATEGORIES || category.to_lowercase() == active.to_lowercase()
}

fn query_matches(record: &ProjectRecord, query_lower: &str) -> bool {
    [&record.title, &record.client, &record.location]
        .iter()
        .any(|text| text.to_lowercase().contains(query_lower))
}

/// Derives the visible gallery from `source`.
///
/// Records are kept when their category matches (or the filter is "all") and, for a
/// non-empty query, when title, client or location contain it case-insensitively.
/// Budget and duration sorts are descending by [`magnitude`] and stable.
///
/// # Arguments
///
/// * `source` - The full project list in source order
/// * `state` - The active filter selection
///
/// # Returns
///
/// References into `source` in display order.
pub fn apply_filters<'a>(source: &'a [ProjectRecord], state: &FilterState) -> Vec<&'a ProjectRecord> {
    let query = state.search_query.to_lowercase();
    let mut view: Vec<&ProjectRecord> = source
        .iter()
        .filter(|record| category_matches(&record.category, &state.active_category))
        .filter(|record| query.is_empty() || query_matches(record, &query))
        .collect();

    match state.sort_order {
        SortOrder::Default => {}
        SortOrder::Budget => view.sort_by_key(|record| Reverse(magnitude(&record.budget))),
        SortOrder::Duration => view.sort_by_key(|record| Reverse(magnitude(&record.duration))),
    }
    view
}

/// Number of records per category, keyed by lowercase category name.
///
/// The [`ALL_CATEGORIES`] key holds the total. Categories without records map to 0.
pub fn category_counts(source: &[ProjectRecord], categories: &[String]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    counts.insert(ALL_CATEGORIES.to_string(), source.len());
    for category in categories {
        let key = category.to_lowercase();
        let count = source
            .iter()
            .filter(|record| record.category.to_lowercase() == key)
            .count();
        counts.insert(key, count);
    }
    counts
}

/// Services shown for the selected services category.
pub fn filter_services<'a>(services: &'a [ServiceItem], active: &str) -> Vec<&'a ServiceItem> {
    services
        .iter()
        .filter(|service| category_matches(&service.category, active))
        .collect()
}
