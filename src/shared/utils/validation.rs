use regex::Regex;
use std::sync::OnceLock;

use crate::shared::errors::AppError;

/// MySQL caps identifier length at 64 characters
const MAX_IDENTIFIER_LEN: usize = 64;

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
    })
}

pub struct Validator;

impl Validator {
    /// Table names are spliced into SQL text, so only plain identifiers are accepted.
    pub fn validate_identifier(field: &str, value: &str) -> Result<(), AppError> {
        if value.is_empty() {
            return Err(AppError::InvalidConfig(format!("{} cannot be empty", field)));
        }
        if value.len() > MAX_IDENTIFIER_LEN {
            return Err(AppError::InvalidConfig(format!(
                "{} too long (max {} characters)",
                field, MAX_IDENTIFIER_LEN
            )));
        }
        if !identifier_pattern().is_match(value) {
            return Err(AppError::InvalidConfig(format!(
                "{} contains invalid characters: {}",
                field, value
            )));
        }
        Ok(())
    }

    /// Database names are passed to the drivers, never spliced into
    /// statements, so anything without path or namespace separators is fine.
    pub fn validate_name(field: &str, value: &str) -> Result<(), AppError> {
        if value.trim().is_empty() {
            return Err(AppError::InvalidConfig(format!("{} cannot be empty", field)));
        }
        if value.contains(['/', '\\', '.', '$', ' ', '\0']) {
            return Err(AppError::InvalidConfig(format!(
                "{} contains invalid characters: {}",
                field, value
            )));
        }
        Ok(())
    }

    /// MongoDB collection names may contain dots (`file_split.stats`); only
    /// `$` and NUL are reserved.
    pub fn validate_collection_name(field: &str, value: &str) -> Result<(), AppError> {
        if value.trim().is_empty() {
            return Err(AppError::InvalidConfig(format!("{} cannot be empty", field)));
        }
        if value.contains(['$', '\0']) {
            return Err(AppError::InvalidConfig(format!(
                "{} contains invalid characters: {}",
                field, value
            )));
        }
        Ok(())
    }

    pub fn validate_host(field: &str, host: &str) -> Result<(), AppError> {
        if host.trim().is_empty() {
            return Err(AppError::InvalidConfig(format!("{} cannot be empty", field)));
        }
        if host.contains(['/', '@', ' ']) {
            return Err(AppError::InvalidConfig(format!(
                "{} must be a bare host name or address: {}",
                field, host
            )));
        }
        Ok(())
    }

    pub fn validate_port(field: &str, port: u16) -> Result<(), AppError> {
        if port == 0 {
            return Err(AppError::InvalidConfig(format!("{} must be non-zero", field)));
        }
        Ok(())
    }

    pub fn validate_not_empty(field: &str, value: &str) -> Result<(), AppError> {
        if value.is_empty() {
            return Err(AppError::InvalidConfig(format!("{} cannot be empty", field)));
        }
        Ok(())
    }
}
