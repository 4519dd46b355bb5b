pub mod logger;
pub mod timeout;
pub mod validation;

pub use logger::{init_logger, LogContext, TimedOperation};
pub use timeout::with_timeout;
pub use validation::Validator;
