/// Database access layer
///
/// `executor` runs caller-supplied SQL; `feature_repo` owns the
/// parameterized statements against the feature side table.
pub mod executor;
pub mod feature_repo;
pub mod row_codec;

pub use executor::QueryExecutor;
