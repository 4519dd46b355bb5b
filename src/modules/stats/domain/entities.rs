//! Stats documents are written by the decompression workers and have no
//! schema at this layer; they are passed through as generic BSON documents.
use mongodb::bson::Document;

pub type StatsDocument = Document;
