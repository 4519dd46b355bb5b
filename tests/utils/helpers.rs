/// Facade and config builders for integration tests
use super::memory::{InMemoryJobRepository, InMemoryStatsRepository};
use log_viewer_db::{DbConfig, DbManager, MongoConfig, MySqlConfig, StatsDocument};
use std::sync::Arc;
use std::time::Duration;

pub struct TestServices {
    pub manager: DbManager,
    pub jobs: Arc<InMemoryJobRepository>,
    pub stats: Arc<InMemoryStatsRepository>,
}

/// Facade over in-memory stores seeded with `documents`
pub fn build_test_services(documents: Vec<StatsDocument>) -> TestServices {
    let jobs = Arc::new(InMemoryJobRepository::new());
    let stats = Arc::new(InMemoryStatsRepository::new(documents));
    let manager = DbManager::from_repositories(jobs.clone(), stats.clone(), Duration::from_secs(1));
    TestServices {
        manager,
        jobs,
        stats,
    }
}

/// Config pointing both stores at a port nothing listens on
pub fn unreachable_config() -> DbConfig {
    let mysql = MySqlConfig {
        user: "clp-user".to_string(),
        password: "secret".to_string(),
        host: "127.0.0.1".to_string(),
        port: 1,
        database: "clp-db".to_string(),
        query_jobs_table_name: "query_jobs".to_string(),
        max_connections: 1,
    };
    let mongo = MongoConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        database: "clp-db".to_string(),
        stats_collection_name: "stats".to_string(),
    };

    let mut config = DbConfig::new(mysql, mongo);
    config.connect_timeout_ms = 300;
    config.operation_timeout_ms = 1_000;
    config
}
