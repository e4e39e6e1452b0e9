//! SKU selection policy.

use std::collections::HashSet;

use super::types::SkuRecord;
use crate::error::{ProbeError, Result};

/// Message reported when the selection leaves nothing to report on
pub const NO_SKUS_FOUND: &str = "No Skus found";

/// Either an include-set or an exclude-set, never both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SkuFilter {
    #[default]
    All,
    Include(HashSet<String>),
    Exclude(HashSet<String>),
}

impl SkuFilter {
    /// Builds the active selector. A non-empty include list wins and the
    /// exclude list is dropped entirely.
    pub fn from_lists(include: &[String], exclude: &[String]) -> Self {
        let include: HashSet<String> = normalize(include);
        if !include.is_empty() {
            if !exclude.is_empty() {
                log::info!("Include list given, ignoring {} excluded SKUs", exclude.len());
            }
            return SkuFilter::Include(include);
        }

        let exclude: HashSet<String> = normalize(exclude);
        if exclude.is_empty() {
            SkuFilter::All
        } else {
            SkuFilter::Exclude(exclude)
        }
    }

    pub fn matches(&self, sku: &SkuRecord) -> bool {
        match self {
            SkuFilter::All => true,
            SkuFilter::Include(ids) => ids.contains(&sku.id),
            SkuFilter::Exclude(ids) => !ids.contains(&sku.id),
        }
    }

    /// Applies the selector, keeping upstream order.
    ///
    /// Fails with `NoMatchingSkus` when nothing survives.
    pub fn apply(&self, all: &[SkuRecord]) -> Result<Vec<SkuRecord>> {
        let selected: Vec<SkuRecord> = all.iter().filter(|s| self.matches(s)).cloned().collect();

        log::debug!("SKU filter kept {} of {}", selected.len(), all.len());

        if selected.is_empty() {
            return Err(ProbeError::no_matching_skus(NO_SKUS_FOUND));
        }
        Ok(selected)
    }
}

/// Convenience wrapper over [`SkuFilter::from_lists`] and [`SkuFilter::apply`].
pub fn filter(all: &[SkuRecord], include: &[String], exclude: &[String]) -> Result<Vec<SkuRecord>> {
    SkuFilter::from_lists(include, exclude).apply(all)
}

fn normalize(ids: &[String]) -> HashSet<String> {
    ids.iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
