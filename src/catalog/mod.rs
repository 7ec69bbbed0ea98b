//! Predefined card catalog: the versioned JSON document of cards and their
//! default benefits that a remote fetch service hands to this crate.
//!
//! Parsing is the validation boundary: unknown recurrence tags fail here,
//! while missing optional fields quietly take their defaults. Transport
//! (HTTP, caching, refresh cadence) lives in the host.

mod types;

use std::path::Path;

use crate::errors::CoreError;

pub use types::{
    BenefitValue, Catalog, HalfYearPeriod, PredefinedBenefit, PredefinedCard, ReminderSpec,
    UsageTracking,
};

impl Catalog {
    /// Parses a catalog document from its JSON wire form.
    pub fn from_json(data: &str) -> Result<Catalog, CoreError> {
        let catalog: Catalog = serde_json::from_str(data)?;
        Ok(catalog)
    }

    /// Reads and parses a catalog document from disk (the host's cache file).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Catalog, CoreError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn card_by_id(&self, id: &str) -> Option<&PredefinedCard> {
        self.predefined_cards.iter().find(|card| card.id == id)
    }

    /// Case-insensitive search over name, issuer, and category. An empty
    /// query matches everything.
    pub fn search(&self, query: &str) -> Vec<&PredefinedCard> {
        if query.is_empty() {
            return self.predefined_cards.iter().collect();
        }
        let query = query.to_lowercase();
        self.predefined_cards
            .iter()
            .filter(|card| {
                card.name.to_lowercase().contains(&query)
                    || card.issuer.to_lowercase().contains(&query)
                    || card.category.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Whether this document's schema version differs from a cached one.
    /// A changed version is the host's cue to reconcile every local card.
    pub fn version_changed(&self, cached_version: Option<&str>) -> bool {
        cached_version != Some(self.schema_version.as_str())
    }
}
