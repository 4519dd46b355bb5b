/// sqlx-based implementation of JobRepository
///
/// Uses MySQL with a single table of `(id, job_config)` rows. The table name
/// comes from configuration, so it is validated as a plain identifier before
/// any statement text is built from it.
use crate::modules::jobs::domain::codec::{decode_job_config, encode_job_config};
use crate::modules::jobs::domain::entities::{InsertResult, JobConfig, JobId};
use crate::modules::jobs::domain::repository::JobRepository;
use crate::modules::jobs::infrastructure::models::JobConfigRow;
use crate::shared::config::MySqlConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{LogContext, TimedOperation, Validator};
use crate::{log_info, log_warn};
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::time::Duration;

pub struct MySqlJobRepository {
    pool: MySqlPool,
    table_name: String,
    insert_sql: String,
    select_sql: String,
}

impl MySqlJobRepository {
    /// Open the shared handle and verify the server answers.
    pub async fn connect(config: &MySqlConfig, connect_timeout: Duration) -> AppResult<Self> {
        config.validate()?;
        LogContext::connection_attempt("MySQL", &config.address());

        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        // connect_with opens the first connection eagerly, so a bad host or
        // bad credentials fail here rather than on the first query
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(connect_timeout)
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::Connection(format!(
                    "Failed to connect to MySQL at {}: {}",
                    config.address(),
                    e
                ))
            })?;

        log_info!(
            "MySQL connection established to {} (table: {}, max_connections: {})",
            config.address(),
            config.query_jobs_table_name,
            config.max_connections
        );

        Self::from_pool(pool, &config.query_jobs_table_name)
    }

    /// Create a repository from an existing pool (useful for testing)
    pub fn from_pool(pool: MySqlPool, table_name: &str) -> AppResult<Self> {
        Validator::validate_identifier("query_jobs_table_name", table_name)?;

        Ok(Self {
            pool,
            table_name: table_name.to_string(),
            insert_sql: format!(
                "INSERT INTO `{}` (id, job_config) VALUES (?, ?)",
                table_name
            ),
            select_sql: format!("SELECT job_config FROM `{}` WHERE id = ?", table_name),
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    fn write_error(id: JobId, err: sqlx::Error) -> AppError {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return AppError::StorageWrite(format!("Job {} already exists", id));
            }
        }
        AppError::StorageWrite(format!("Failed to insert job {}: {}", id, err))
    }

    fn read_error(id: JobId, err: sqlx::Error) -> AppError {
        AppError::StorageRead(format!("Failed to get job {}: {}", id, err))
    }
}

#[async_trait]
impl JobRepository for MySqlJobRepository {
    async fn insert_job(&self, id: JobId, config: &JobConfig) -> AppResult<InsertResult> {
        let blob = encode_job_config(config)?;
        let timer = TimedOperation::new("insert", &self.table_name);

        let result = sqlx::query(&self.insert_sql)
            .bind(id.value())
            .bind(blob)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::write_error(id, e))?;

        timer.finish();

        Ok(InsertResult {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_id(),
        })
    }

    async fn get_job(&self, id: JobId) -> AppResult<JobConfig> {
        let timer = TimedOperation::new("select", &self.table_name);

        let row = sqlx::query_as::<_, JobConfigRow>(&self.select_sql)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::read_error(id, e))?;

        timer.finish();

        let row = row.ok_or_else(|| AppError::NotFound(format!("Job {} not found", id)))?;

        decode_job_config(&row.job_config).map_err(|e| {
            log_warn!("Stored config for job {} is unreadable: {}", id, e);
            e
        })
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::StorageRead(format!("MySQL ping failed: {}", e)))?;
        Ok(())
    }

    async fn close(&self) {
        if !self.pool.is_closed() {
            self.pool.close().await;
            log_info!("MySQL connection closed");
        }
    }
}
