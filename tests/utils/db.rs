/// Live database helpers for the `#[ignore]`d tests
///
/// Connection details come from `TEST_MYSQL_*` and `TEST_MONGO_*` in the
/// environment (or `.env`). Each helper works in its own uniquely named table
/// or collection and drops it afterwards, so test processes can run in
/// parallel against the same servers.
use log_viewer_db::{DbConfig, MongoConfig, MySqlConfig};
use sqlx::Executor;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

static TEST_DB_COUNTER: AtomicU32 = AtomicU32::new(0);

fn var(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("{} must be set in .env for tests", name))
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Unique name of the form `{prefix}_{process_id}_{counter}`
pub fn unique_name(prefix: &str) -> String {
    format!(
        "{}_{}_{}",
        prefix,
        std::process::id(),
        TEST_DB_COUNTER.fetch_add(1, Ordering::SeqCst)
    )
}

pub fn live_mysql_config(table: &str) -> MySqlConfig {
    dotenvy::dotenv().ok();
    MySqlConfig {
        user: var("TEST_MYSQL_USER"),
        password: var_or("TEST_MYSQL_PASSWORD", ""),
        host: var_or("TEST_MYSQL_HOST", "127.0.0.1"),
        port: var_or("TEST_MYSQL_PORT", "3306")
            .parse()
            .expect("TEST_MYSQL_PORT must be a port number"),
        database: var("TEST_MYSQL_DATABASE"),
        query_jobs_table_name: table.to_string(),
        max_connections: 1,
    }
}

pub fn live_mongo_config(collection: &str) -> MongoConfig {
    dotenvy::dotenv().ok();
    MongoConfig {
        host: var_or("TEST_MONGO_HOST", "127.0.0.1"),
        port: var_or("TEST_MONGO_PORT", "27017")
            .parse()
            .expect("TEST_MONGO_PORT must be a port number"),
        database: var("TEST_MONGO_DATABASE"),
        stats_collection_name: collection.to_string(),
    }
}

pub fn live_config(table: &str, collection: &str) -> DbConfig {
    DbConfig::new(live_mysql_config(table), live_mongo_config(collection))
}

/// Scratch MySQL table shaped like the query jobs table
pub struct TestTable {
    pub config: MySqlConfig,
    pool: sqlx::MySqlPool,
}

impl TestTable {
    pub async fn create() -> Self {
        let config = live_mysql_config(&unique_name("query_jobs"));
        let options = sqlx::mysql::MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);
        let pool = sqlx::mysql::MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await
            .expect("Failed to connect to test MySQL server");

        pool.execute(
            format!(
                "CREATE TABLE `{}` (id INT PRIMARY KEY, job_config VARBINARY(60000) NOT NULL)",
                config.query_jobs_table_name
            )
            .as_str(),
        )
        .await
        .expect("Failed to create test table");

        Self { config, pool }
    }

    /// Write a row directly, bypassing the codec
    pub async fn insert_raw(&self, id: i64, blob: &[u8]) {
        sqlx::query(&format!(
            "INSERT INTO `{}` (id, job_config) VALUES (?, ?)",
            self.config.query_jobs_table_name
        ))
        .bind(id)
        .bind(blob)
        .execute(&self.pool)
        .await
        .expect("Failed to insert raw row");
    }

    pub async fn cleanup(self) {
        self.pool
            .execute(format!("DROP TABLE IF EXISTS `{}`", self.config.query_jobs_table_name).as_str())
            .await
            .expect("Failed to drop test table");
        self.pool.close().await;
    }
}

/// Scratch MongoDB collection
pub struct TestCollection {
    pub config: MongoConfig,
    client: mongodb::Client,
}

impl TestCollection {
    pub async fn create() -> Self {
        let config = live_mongo_config(&unique_name("stats"));
        let client = mongodb::Client::with_uri_str(config.uri())
            .await
            .expect("Failed to connect to test MongoDB server");
        Self { config, client }
    }

    pub fn collection(&self) -> mongodb::Collection<mongodb::bson::Document> {
        self.client
            .database(&self.config.database)
            .collection(&self.config.stats_collection_name)
    }

    pub async fn cleanup(self) {
        self.collection()
            .drop()
            .await
            .expect("Failed to drop test collection");
    }
}
