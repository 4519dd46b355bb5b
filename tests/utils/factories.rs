/// Test data factories
use log_viewer_db::{JobConfig, StatsDocument};
use mongodb::bson::spec::BinarySubtype;
use mongodb::bson::{doc, Binary, Bson};
use rmpv::Value;

/// The config a host sends for a single extraction: `{path, fields}`
pub fn extraction_config(path: &str, fields: &[&str]) -> JobConfig {
    JobConfig::new(Value::Map(vec![
        (Value::from("path"), Value::from(path)),
        (
            Value::from("fields"),
            Value::Array(fields.iter().map(|f| Value::from(*f)).collect()),
        ),
    ]))
}

/// A config touching every MessagePack value kind
pub fn exhaustive_config() -> JobConfig {
    JobConfig::new(Value::Map(vec![
        (Value::from("nil"), Value::Nil),
        (Value::from("flag"), Value::Boolean(true)),
        (Value::from("negative"), Value::from(-42_i64)),
        (Value::from("huge"), Value::from(u64::MAX)),
        (Value::from("ratio32"), Value::F32(0.5)),
        (Value::from("ratio64"), Value::F64(1.0e-9)),
        (Value::from("blob"), Value::Binary(vec![0x00, 0xff, 0x10])),
        (Value::from("ext"), Value::Ext(7, vec![1, 2, 3])),
        (
            Value::from("nested"),
            Value::Map(vec![(
                Value::from(1),
                Value::Array(vec![Value::from("a"), Value::Nil, Value::F64(2.5)]),
            )]),
        ),
    ]))
}

pub fn stats_document(archive_id: &str, uncompressed_size: i64, begin_ts: i64) -> StatsDocument {
    doc! {
        "archive_id": archive_id,
        "uncompressed_size": uncompressed_size,
        "begin_timestamp": begin_ts,
        "tags": ["prod", "ingest"],
        "meta": { "compressed": true, "ratio": 12.5 },
        "checksum": Binary { subtype: BinarySubtype::Generic, bytes: vec![0xde, 0xad] },
        "note": Bson::Null,
    }
}
