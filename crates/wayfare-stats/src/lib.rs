//! wayfare-stats - Conversion-rate aggregation
//!
//! Pure views over an immutable [`Dataset`](wayfare_core::Dataset):
//!
//! - **GroupKey**: every supported grouping key, resolvable from the string
//!   names presentation layers pass in
//! - **ConversionSummary**: per-group searches, bookings, and conversion
//!   rate for one key
//! - **CrossTab**: two-key conversion-rate matrix for heatmap-style views
//! - **MonthlyRow**: calendar-month trend rows with mobile share
//! - **Overview**: whole-dataset headline metrics
//!
//! Every function here is side-effect-free and can be called repeatedly
//! with different keys without re-deriving the dataset. Records whose key
//! value is undefined are excluded from that key's partitions; they are
//! never lumped into a synthetic category.

pub mod conversion;
pub mod crosstab;
pub mod key;
pub mod monthly;
pub mod overview;

pub use conversion::{
    aggregate, aggregate_by_name, ConversionSummary, GroupConversion, MIN_RANK_SEARCHES,
};
pub use crosstab::{crosstab, crosstab_by_name, CrossTab};
pub use key::{GroupKey, KeyError};
pub use monthly::{mobile_growth_percent, monthly_summary, MonthlyRow};
pub use overview::Overview;
