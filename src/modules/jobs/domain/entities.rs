//! Domain entities for decompression job records
//!
//! A job record is an integer id plus an opaque configuration value. The
//! configuration is kept as a MessagePack value so binary fields, f32 vs f64
//! and map key order survive storage untouched.
use crate::modules::jobs::domain::codec;
use crate::shared::errors::AppResult;
use rmpv::Value;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Identifier of a decompression job row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(i64);

impl JobId {
    /// Id used by hosts that only ever keep one job in flight
    pub const SINGLE_JOB: JobId = JobId(1);

    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for JobId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque job configuration (archive location, target fields, filters, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobConfig(Value);

impl JobConfig {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Build from any serde value. Structs become string-keyed maps, the
    /// same shape a MessagePack encoder gives a plain object.
    pub fn from_serializable<T>(value: &T) -> AppResult<Self>
    where
        T: Serialize + ?Sized,
    {
        let bytes = rmp_serde::to_vec_named(value)?;
        codec::decode_job_config(&bytes)
    }

    /// Build from a JSON body as received by the HTTP layer
    pub fn from_json(value: &serde_json::Value) -> AppResult<Self> {
        Self::from_serializable(value)
    }

    /// Deserialize into a typed configuration struct
    pub fn deserialize<T: DeserializeOwned>(&self) -> AppResult<T> {
        let bytes = codec::encode_job_config(self)?;
        Ok(rmp_serde::from_slice(&bytes)?)
    }

    /// Look up a top-level field when the configuration is a map with string keys
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.as_map().and_then(|entries| {
            entries
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v)
        })
    }
}

impl From<Value> for JobConfig {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Acknowledgement returned by the relational store for an insert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertResult {
    pub rows_affected: u64,
    pub last_insert_id: u64,
}
