//! Data contract with the external fact-lookup service.
//!
//! The core only builds queries and carries results; it never interprets the
//! returned text.

use crate::geo::GeoCoordinate;
use fnv::FnvHashSet;

#[derive(Clone, Debug, PartialEq)]
pub enum FactQuery {
    Category(String),
    Location(GeoCoordinate),
}

impl FactQuery {
    pub fn label(&self) -> String {
        match self {
            FactQuery::Category(name) => name.trim().to_string(),
            FactQuery::Location(coord) => coord.to_string(),
        }
    }

    pub fn location(&self) -> Option<GeoCoordinate> {
        match self {
            FactQuery::Location(coord) => Some(*coord),
            FactQuery::Category(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactSource {
    pub uri: String,
    pub title: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FactResult {
    pub text: String,
    pub sources: Vec<FactSource>,
}

impl FactResult {
    /// Build a result as returned by the service, cleaning up its citations.
    pub fn new(text: impl Into<String>, sources: impl IntoIterator<Item = FactSource>) -> Self {
        let mut result = Self {
            text: text.into(),
            sources: sources.into_iter().collect(),
        };
        result.dedup_sources();
        result
    }

    /// Drop citations without a usable URI and collapse duplicates, keeping
    /// first-seen order.
    pub fn dedup_sources(&mut self) {
        let mut seen = FnvHashSet::default();
        self.sources.retain_mut(|s| {
            let uri = s.uri.trim().to_string();
            if uri.is_empty() || !seen.insert(uri.clone()) {
                return false;
            }
            s.uri = uri;
            true
        });
    }
}
