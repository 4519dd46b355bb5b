/// In-memory stand-ins for both stores
///
/// They behave like the real backends where it matters to callers: job
/// configs go through the MessagePack codec on the way in and out, ids are
/// unique, and stats come back in insertion order.
use async_trait::async_trait;
use log_viewer_db::modules::jobs::{decode_job_config, encode_job_config};
use log_viewer_db::{
    AppError, AppResult, InsertResult, JobConfig, JobId, JobRepository, StatsDocument,
    StatsRepository,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryJobRepository {
    rows: Mutex<HashMap<JobId, Vec<u8>>>,
    closed: AtomicBool,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes under `id`, bypassing the codec
    pub fn insert_raw(&self, id: JobId, blob: Vec<u8>) {
        self.rows.lock().unwrap().insert(id, blob);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn insert_job(&self, id: JobId, config: &JobConfig) -> AppResult<InsertResult> {
        let blob = encode_job_config(config)?;
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&id) {
            return Err(AppError::StorageWrite(format!("Job {} already exists", id)));
        }
        rows.insert(id, blob);
        Ok(InsertResult {
            rows_affected: 1,
            last_insert_id: id.value() as u64,
        })
    }

    async fn get_job(&self, id: JobId) -> AppResult<JobConfig> {
        let blob = self
            .rows
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Job {} not found", id)))?;
        decode_job_config(&blob)
    }

    async fn ping(&self) -> AppResult<()> {
        if self.is_closed() {
            return Err(AppError::StorageRead("connection closed".to_string()));
        }
        Ok(())
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct InMemoryStatsRepository {
    documents: Vec<StatsDocument>,
    closed: AtomicBool,
}

impl InMemoryStatsRepository {
    pub fn new(documents: Vec<StatsDocument>) -> Self {
        Self {
            documents,
            closed: AtomicBool::new(false),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatsRepository for InMemoryStatsRepository {
    async fn get_stats(&self) -> AppResult<Vec<StatsDocument>> {
        Ok(self.documents.clone())
    }

    async fn count_stats(&self) -> AppResult<u64> {
        Ok(self.documents.len() as u64)
    }

    async fn ping(&self) -> AppResult<()> {
        if self.is_closed() {
            return Err(AppError::StorageRead("connection closed".to_string()));
        }
        Ok(())
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
