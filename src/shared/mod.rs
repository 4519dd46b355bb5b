// Shared kernel: configuration, error types and cross-cutting utilities

pub mod config; // Store connection parameters
pub mod errors; // Shared error types
pub mod utils; // Logging, timeouts, validation

pub use config::{DbConfig, MongoConfig, MySqlConfig};
pub use errors::{AppError, AppResult, ErrorKind};
