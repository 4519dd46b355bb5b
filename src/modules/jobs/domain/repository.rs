/// Repository trait for decompression job persistence
///
/// Records are written once and read any number of times; there is no
/// update or delete at this layer.
use crate::modules::jobs::domain::entities::{InsertResult, JobConfig, JobId};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Encode `config` and insert it under `id`.
    ///
    /// A second insert with the same id is rejected by the store and
    /// surfaces as `StorageWrite`.
    async fn insert_job(&self, id: JobId, config: &JobConfig) -> AppResult<InsertResult>;

    /// Fetch and decode the config stored under `id`; `NotFound` if there is no such row
    async fn get_job(&self, id: JobId) -> AppResult<JobConfig>;

    /// Round-trip check of the underlying connection
    async fn ping(&self) -> AppResult<()>;

    /// Release the connection handle. Calls after the first are no-ops.
    async fn close(&self);
}
