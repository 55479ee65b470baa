//! wayfare-core - Domain records and feature derivation
//!
//! This crate holds the pure core of wayfare, an analytics library over a
//! static travel-booking search log:
//!
//! - **SearchRecord**: one raw row of the search log
//! - **EnrichedRecord**: a row plus its derived categorical features
//! - **Dataset**: the immutable load-once handle every consumer borrows
//!
//! Feature derivation is total and deterministic: a record with missing
//! check-in/check-out dates simply carries `None` derived fields instead of
//! failing the batch. Nothing in this crate performs I/O.

pub mod dataset;
pub mod derive;
pub mod record;

pub use dataset::Dataset;
pub use derive::{derive_features, derive_record};
pub use record::{EnrichedRecord, SearchRecord, TravelGroup};
