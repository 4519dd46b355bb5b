pub mod codec;
pub mod entities;
pub mod repository;

pub use codec::{decode_job_config, encode_job_config};
pub use entities::{InsertResult, JobConfig, JobId};
pub use repository::JobRepository;
