/// Row shapes for the query jobs table
use sqlx::FromRow;

/// `SELECT job_config ...` projection
#[derive(Debug, Clone, FromRow)]
pub struct JobConfigRow {
    pub job_config: Vec<u8>,
}
