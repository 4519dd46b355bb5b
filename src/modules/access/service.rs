/// Access facade over the job store and the stats store
///
/// `DbManager` is the only entry point the hosting service talks to. It owns
/// one handle per store and bounds every delegated call by the configured
/// per-operation timeout.
use crate::modules::jobs::domain::entities::{InsertResult, JobConfig, JobId};
use crate::modules::jobs::domain::repository::JobRepository;
use crate::modules::jobs::infrastructure::MySqlJobRepository;
use crate::modules::stats::domain::entities::StatsDocument;
use crate::modules::stats::domain::repository::StatsRepository;
use crate::modules::stats::infrastructure::MongoStatsRepository;
use crate::shared::config::DbConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::with_timeout;
use crate::{log_error, log_info};
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Reachability of a single store at the time of a health check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum ComponentHealth {
    Up,
    Down(String),
}

impl ComponentHealth {
    fn from_result(result: AppResult<()>) -> Self {
        match result {
            Ok(()) => ComponentHealth::Up,
            Err(e) => ComponentHealth::Down(e.to_string()),
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, ComponentHealth::Up)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStatus {
    pub mysql: ComponentHealth,
    pub mongo: ComponentHealth,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.mysql.is_up() && self.mongo.is_up()
    }
}

pub struct DbManager {
    jobs: Arc<dyn JobRepository>,
    stats: Arc<dyn StatsRepository>,
    operation_timeout: Duration,
}

impl fmt::Debug for DbManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbManager")
            .field("operation_timeout", &self.operation_timeout)
            .finish_non_exhaustive()
    }
}

/// Bound a connection attempt; running out of time counts as failing to connect.
async fn connect_within<T, F>(store: &str, limit: Duration, future: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Connection(format!(
            "Timed out connecting to {} after {}ms",
            store,
            limit.as_millis()
        ))),
    }
}

impl DbManager {
    /// Connect both stores concurrently.
    ///
    /// Either both handles are open on return or neither is: if one side fails
    /// the other is closed before the error is returned.
    pub async fn connect(config: &DbConfig) -> AppResult<Self> {
        config.validate()?;
        let connect_timeout = config.connect_timeout();

        Self::connect_with(
            MySqlJobRepository::connect(&config.mysql, connect_timeout),
            MongoStatsRepository::connect(&config.mongo, connect_timeout),
            connect_timeout,
            config.operation_timeout(),
        )
        .await
    }

    /// Drive two store connection futures concurrently, each bounded by
    /// `connect_timeout`, and build the facade only if both succeed.
    pub async fn connect_with<J, S, FJ, FS>(
        jobs: FJ,
        stats: FS,
        connect_timeout: Duration,
        operation_timeout: Duration,
    ) -> AppResult<Self>
    where
        J: JobRepository + 'static,
        S: StatsRepository + 'static,
        FJ: Future<Output = AppResult<J>>,
        FS: Future<Output = AppResult<S>>,
    {
        let (jobs, stats) = tokio::join!(
            connect_within("MySQL", connect_timeout, jobs),
            connect_within("MongoDB", connect_timeout, stats),
        );

        match (jobs, stats) {
            (Ok(jobs), Ok(stats)) => {
                log_info!("Database access layer ready");
                Ok(Self::from_repositories(
                    Arc::new(jobs),
                    Arc::new(stats),
                    operation_timeout,
                ))
            }
            (Ok(jobs), Err(e)) => {
                log_error!("MongoDB connection failed: {}", e);
                jobs.close().await;
                Err(e)
            }
            (Err(e), Ok(stats)) => {
                log_error!("MySQL connection failed: {}", e);
                stats.close().await;
                Err(e)
            }
            (Err(mysql_err), Err(mongo_err)) => {
                log_error!("MySQL connection failed: {}", mysql_err);
                log_error!("MongoDB connection failed: {}", mongo_err);
                Err(mysql_err)
            }
        }
    }

    pub fn from_repositories(
        jobs: Arc<dyn JobRepository>,
        stats: Arc<dyn StatsRepository>,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            jobs,
            stats,
            operation_timeout,
        }
    }

    pub fn operation_timeout(&self) -> Duration {
        self.operation_timeout
    }

    /// Store `config` under `id`. Ids are never overwritten.
    pub async fn insert_decompression_job(
        &self,
        id: JobId,
        config: &JobConfig,
    ) -> AppResult<InsertResult> {
        with_timeout(
            "insert_decompression_job",
            self.operation_timeout,
            self.jobs.insert_job(id, config),
        )
        .await
    }

    pub async fn get_decompression_job(&self, id: JobId) -> AppResult<JobConfig> {
        with_timeout(
            "get_decompression_job",
            self.operation_timeout,
            self.jobs.get_job(id),
        )
        .await
    }

    /// Every document in the stats collection, fully materialized.
    pub async fn get_stats(&self) -> AppResult<Vec<StatsDocument>> {
        with_timeout("get_stats", self.operation_timeout, self.stats.get_stats()).await
    }

    pub async fn count_stats(&self) -> AppResult<u64> {
        with_timeout("count_stats", self.operation_timeout, self.stats.count_stats()).await
    }

    /// Ping both stores concurrently. Never fails; unreachable stores are reported as `Down`.
    pub async fn health_check(&self) -> HealthStatus {
        let (mysql, mongo) = tokio::join!(
            with_timeout("mysql ping", self.operation_timeout, self.jobs.ping()),
            with_timeout("mongo ping", self.operation_timeout, self.stats.ping()),
        );

        HealthStatus {
            mysql: ComponentHealth::from_result(mysql),
            mongo: ComponentHealth::from_result(mongo),
        }
    }

    /// Close both store handles. Safe to call more than once.
    pub async fn close(&self) {
        tokio::join!(self.jobs.close(), self.stats.close());
    }

    pub async fn shutdown(self) {
        self.close().await;
        log_info!("Database access layer shut down");
    }
}
