/// MongoDB-based implementation of StatsRepository
use crate::modules::stats::domain::entities::StatsDocument;
use crate::modules::stats::domain::repository::StatsRepository;
use crate::shared::config::MongoConfig;
use crate::log_info;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{LogContext, TimedOperation};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

const APP_NAME: &str = "log-viewer-db";

pub struct MongoStatsRepository {
    client: Client,
    collection: Collection<StatsDocument>,
    closed: AtomicBool,
}

impl MongoStatsRepository {
    /// Build the client and ping the server, so an unreachable store fails
    /// here instead of on the first read.
    pub async fn connect(config: &MongoConfig, connect_timeout: Duration) -> AppResult<Self> {
        config.validate()?;
        let uri = config.uri();
        LogContext::connection_attempt("MongoDB", &uri);

        let connection_error = |e: mongodb::error::Error| {
            AppError::Connection(format!("Failed to connect to MongoDB at {}: {}", uri, e))
        };

        let mut options = ClientOptions::parse(&uri).await.map_err(connection_error)?;
        options.app_name = Some(APP_NAME.to_string());
        options.connect_timeout = Some(connect_timeout);
        options.server_selection_timeout = Some(connect_timeout);

        let client = Client::with_options(options).map_err(connection_error)?;
        client
            .database(&config.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(connection_error)?;

        log_info!(
            "MongoDB connection established to {} (collection: {})",
            uri,
            config.stats_collection_name
        );

        Ok(Self::from_client(
            client,
            &config.database,
            &config.stats_collection_name,
        ))
    }

    /// Create a repository from an existing client (useful for testing)
    pub fn from_client(client: Client, database: &str, collection: &str) -> Self {
        let collection = client
            .database(database)
            .collection::<StatsDocument>(collection);
        Self {
            client,
            collection,
            closed: AtomicBool::new(false),
        }
    }

    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    fn read_error(operation: &str, err: mongodb::error::Error) -> AppError {
        AppError::StorageRead(format!("Failed to {} stats: {}", operation, err))
    }
}

#[async_trait]
impl StatsRepository for MongoStatsRepository {
    async fn get_stats(&self) -> AppResult<Vec<StatsDocument>> {
        let timer = TimedOperation::new("find", self.collection_name());

        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| Self::read_error("query", e))?;
        let documents: Vec<StatsDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| Self::read_error("read", e))?;

        timer.finish_with_info(&format!("{} documents", documents.len()));
        Ok(documents)
    }

    async fn count_stats(&self) -> AppResult<u64> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(|e| Self::read_error("count", e))
    }

    async fn ping(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::StorageRead(format!("MongoDB ping failed: {}", e)))?;
        Ok(())
    }

    async fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.client.clone().shutdown().await;
            log_info!("MongoDB connection closed");
        }
    }
}
