//! Database access layer for the log viewer's decompression service.
//!
//! Persists decompression job configurations to MySQL as MessagePack blobs
//! and reads precomputed stats documents back from MongoDB. Hosts create a
//! [`DbManager`] (directly or through [`ServiceLifecycle`]) at startup and
//! pass it around explicitly.

pub mod modules;
pub mod shared;

pub use modules::access::{
    ComponentHealth, ConnectionState, DbManager, HealthStatus, ServiceLifecycle,
};
pub use modules::jobs::{InsertResult, JobConfig, JobId, JobRepository, MySqlJobRepository};
pub use modules::stats::{MongoStatsRepository, StatsDocument, StatsRepository};
pub use shared::config::{DbConfig, MongoConfig, MySqlConfig};
pub use shared::errors::{AppError, AppResult, ErrorKind};
pub use shared::utils::init_logger;
