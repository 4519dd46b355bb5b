pub mod entities;
pub mod repository;

pub use entities::StatsDocument;
pub use repository::StatsRepository;
