pub mod cors;
pub mod logging;

pub use cors::{cors_middleware, CorsConfig};
pub use logging::request_logging_middleware;
