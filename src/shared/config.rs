//! Connection parameters for both backing stores.
//!
//! The hosting service owns where these values come from; this module only
//! gives them a shape, sensible defaults and a presence check.

use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const ENV_PREFIX: &str = "CLP_DB_";

fn default_mysql_port() -> u16 {
    3306
}

fn default_mongo_port() -> u16 {
    27017
}

fn default_query_jobs_table_name() -> String {
    "query_jobs".to_string()
}

fn default_stats_collection_name() -> String {
    "stats".to_string()
}

fn default_max_connections() -> u32 {
    1
}

fn default_operation_timeout_ms() -> u64 {
    10_000
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

/// Parse an optional numeric setting, falling back to `default` when unset.
fn parse_or<T>(raw: Option<String>, name: &str, default: fn() -> T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match raw {
        None => Ok(default()),
        Some(value) => value.trim().parse().map_err(|e| {
            AppError::InvalidConfig(format!(
                "{}{} has invalid value {:?}: {}",
                ENV_PREFIX, name, value, e
            ))
        }),
    }
}

/// Relational store holding decompression job records.
#[derive(Clone, Deserialize)]
pub struct MySqlConfig {
    pub user: String,
    #[serde(default)]
    pub password: String,
    pub host: String,
    #[serde(default = "default_mysql_port")]
    pub port: u16,
    pub database: String,
    #[serde(default = "default_query_jobs_table_name")]
    pub query_jobs_table_name: String,
    /// Upper bound on physical connections behind the shared handle
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl MySqlConfig {
    /// `host:port/database`, safe to log
    pub fn address(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }

    pub fn validate(&self) -> AppResult<()> {
        Validator::validate_not_empty("mysql.user", &self.user)?;
        Validator::validate_host("mysql.host", &self.host)?;
        Validator::validate_port("mysql.port", self.port)?;
        Validator::validate_name("mysql.database", &self.database)?;
        Validator::validate_identifier("mysql.query_jobs_table_name", &self.query_jobs_table_name)?;
        if self.max_connections == 0 {
            return Err(AppError::InvalidConfig(
                "mysql.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for MySqlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MySqlConfig")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("query_jobs_table_name", &self.query_jobs_table_name)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Document store holding precomputed stats.
#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub host: String,
    #[serde(default = "default_mongo_port")]
    pub port: u16,
    pub database: String,
    #[serde(default = "default_stats_collection_name")]
    pub stats_collection_name: String,
}

impl MongoConfig {
    pub fn uri(&self) -> String {
        format!("mongodb://{}:{}/{}", self.host, self.port, self.database)
    }

    pub fn validate(&self) -> AppResult<()> {
        Validator::validate_host("mongo.host", &self.host)?;
        Validator::validate_port("mongo.port", self.port)?;
        Validator::validate_name("mongo.database", &self.database)?;
        Validator::validate_collection_name(
            "mongo.stats_collection_name",
            &self.stats_collection_name,
        )?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub mysql: MySqlConfig,
    pub mongo: MongoConfig,
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl DbConfig {
    pub fn new(mysql: MySqlConfig, mongo: MongoConfig) -> Self {
        Self {
            mysql,
            mongo,
            operation_timeout_ms: default_operation_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }

    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn validate(&self) -> AppResult<()> {
        self.mysql.validate()?;
        self.mongo.validate()?;
        if self.operation_timeout_ms == 0 {
            return Err(AppError::InvalidConfig(
                "operation_timeout_ms must be non-zero".to_string(),
            ));
        }
        if self.connect_timeout_ms == 0 {
            return Err(AppError::InvalidConfig(
                "connect_timeout_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Load from `CLP_DB_*` environment variables, reading `.env` first if present.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; keys are the `CLP_DB_*` variable names.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));
        let require = |name: &str| {
            get(name).ok_or_else(|| {
                AppError::InvalidConfig(format!(
                    "{}{} environment variable not found",
                    ENV_PREFIX, name
                ))
            })
        };

        let mysql = MySqlConfig {
            user: require("MYSQL_USER")?,
            password: require("MYSQL_PASSWORD")?,
            host: require("MYSQL_HOST")?,
            port: parse_or(get("MYSQL_PORT"), "MYSQL_PORT", default_mysql_port)?,
            database: require("MYSQL_DATABASE")?,
            query_jobs_table_name: get("MYSQL_QUERY_JOBS_TABLE")
                .unwrap_or_else(default_query_jobs_table_name),
            max_connections: parse_or(
                get("MYSQL_MAX_CONNECTIONS"),
                "MYSQL_MAX_CONNECTIONS",
                default_max_connections,
            )?,
        };

        let mongo = MongoConfig {
            host: require("MONGO_HOST")?,
            port: parse_or(get("MONGO_PORT"), "MONGO_PORT", default_mongo_port)?,
            database: require("MONGO_DATABASE")?,
            stats_collection_name: get("MONGO_STATS_COLLECTION")
                .unwrap_or_else(default_stats_collection_name),
        };

        let config = DbConfig {
            mysql,
            mongo,
            operation_timeout_ms: parse_or(
                get("OPERATION_TIMEOUT_MS"),
                "OPERATION_TIMEOUT_MS",
                default_operation_timeout_ms,
            )?,
            connect_timeout_ms: parse_or(
                get("CONNECT_TIMEOUT_MS"),
                "CONNECT_TIMEOUT_MS",
                default_connect_timeout_ms,
            )?,
        };

        config.validate()?;
        Ok(config)
    }
}
