/// Repository trait for reading precomputed stats
use crate::modules::stats::domain::entities::StatsDocument;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Every document in the stats collection, in the order the store returns them.
    ///
    /// The whole collection is materialized in memory. That is fine for the
    /// per-deployment summaries the workers write, but does not scale to
    /// large collections.
    async fn get_stats(&self) -> AppResult<Vec<StatsDocument>>;

    /// Number of documents in the stats collection
    async fn count_stats(&self) -> AppResult<u64>;

    async fn ping(&self) -> AppResult<()>;

    /// Release the connection handle. Calls after the first are no-ops.
    async fn close(&self);
}
