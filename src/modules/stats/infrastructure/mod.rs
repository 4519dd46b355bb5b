pub mod repository;

pub use repository::MongoStatsRepository;
