//! MessagePack codec for the `job_config` column.
//!
//! `encode_job_config` and `decode_job_config` are exact inverses: the value
//! tree is written as-is and read back as-is, with no re-interpretation of
//! types in between.
use crate::modules::jobs::domain::entities::JobConfig;
use crate::shared::errors::{AppError, AppResult};

/// Recursion budget for decoding. rmpv spends one unit per value and one per
/// container or string body, so this allows roughly 60 levels of nesting.
/// The library default of 1024 overflows the stack of a debug-build thread.
const MAX_DECODE_DEPTH: usize = 128;

pub fn encode_job_config(config: &JobConfig) -> AppResult<Vec<u8>> {
    let mut buf = Vec::new();
    rmpv::encode::write_value(&mut buf, config.as_value())?;
    Ok(buf)
}

/// Decode a stored blob. The blob must hold exactly one MessagePack value.
pub fn decode_job_config(bytes: &[u8]) -> AppResult<JobConfig> {
    if bytes.is_empty() {
        return Err(AppError::Decode("Job config blob is empty".to_string()));
    }

    let mut remaining = bytes;
    let value = rmpv::decode::read_value_with_max_depth(&mut remaining, MAX_DECODE_DEPTH)?;

    if !remaining.is_empty() {
        return Err(AppError::Decode(format!(
            "Job config blob has {} trailing bytes after the encoded value",
            remaining.len()
        )));
    }

    Ok(JobConfig::new(value))
}
