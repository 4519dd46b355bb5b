use crate::log_warn;
use crate::shared::errors::{AppError, AppResult};
use std::future::Future;
use std::time::Duration;

/// Run a store operation, failing with [`AppError::Timeout`] once `limit` elapses.
///
/// The inner future is dropped on expiry; whatever the store already applied stays applied.
pub async fn with_timeout<T, F>(operation: &str, limit: Duration, future: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(result) => result,
        Err(_) => {
            log_warn!("{} timed out after {:?}", operation, limit);
            Err(AppError::Timeout(format!(
                "{} did not complete within {}ms",
                operation,
                limit.as_millis()
            )))
        }
    }
}
