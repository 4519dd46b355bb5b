/// Decompression job store
///
/// Stores job configuration records in a MySQL table for the decompression
/// workers to pick up:
/// - Configs are MessagePack blobs keyed by integer job id
/// - Records are insert-once, read-many
///
/// Architecture:
/// - Domain: Entities, codec and repository trait
/// - Infrastructure: sqlx-based repository implementation
pub mod domain;
pub mod infrastructure;

// Re-exports for easy access
pub use domain::{
    codec::{decode_job_config, encode_job_config},
    entities::{InsertResult, JobConfig, JobId},
    repository::JobRepository,
};
pub use infrastructure::MySqlJobRepository;
