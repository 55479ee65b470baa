//! wayfare-io - Search-log CSV loader
//!
//! Reads the search log into `SearchRecord`s once per process. The loader
//! locates the required columns by header name, ignores everything else,
//! and applies the per-cell recovery policy of the core: timestamps and
//! distance recover to `None` in the affected record, while flags, counts,
//! and categorical codes must be well-typed and fail the load with the
//! offending line number when they are not.

pub mod loader;
pub mod schema;

pub use loader::{load_path, load_reader, LoadError, LoadResult};
pub use schema::ColumnIndices;
