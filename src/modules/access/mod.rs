/// Access layer: the facade the hosting service calls, plus its startup lifecycle
pub mod lifecycle;
pub mod service;

pub use lifecycle::{ConnectionState, ServiceLifecycle};
pub use service::{ComponentHealth, DbManager, HealthStatus};
