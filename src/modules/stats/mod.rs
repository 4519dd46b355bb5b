/// Stats reader
///
/// Read-only access to the collection of statistics documents the
/// decompression workers produce.
pub mod domain;
pub mod infrastructure;

pub use domain::{entities::StatsDocument, repository::StatsRepository};
pub use infrastructure::MongoStatsRepository;
