//! Immutable dataset handle
//!
//! The search log is loaded and derived exactly once per process; every
//! consumer borrows the resulting `Dataset`. Nothing mutates it in place,
//! so concurrent view computations can share it freely.

use crate::derive::derive_features;
use crate::record::{EnrichedRecord, SearchRecord};

/// The derived search log, read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<EnrichedRecord>,
}

impl Dataset {
    /// Run feature derivation once over the raw records.
    pub fn derive(records: Vec<SearchRecord>) -> Self {
        Self {
            records: derive_features(records),
        }
    }

    /// Wrap records that were already derived.
    pub fn from_enriched(records: Vec<EnrichedRecord>) -> Self {
        Self { records }
    }

    /// The enriched records, in load order.
    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    /// Number of records (searches) in the dataset.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
