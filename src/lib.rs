//! Playground Server
//!
//! A small axum HTTP server with a handful of independent endpoints: a hello
//! API, random numbers, version/uptime reporting, JSON echo, weather and
//! currency pages backed by third-party REST APIs, and an in-memory notes
//! resource.
//!
//! ## Architecture
//!
//! - **Models**: note data structures and request validation
//! - **Repositories**: the in-memory [`repositories::NoteStore`]
//! - **Services**: note boundary logic and upstream API clients
//! - **Handlers**: HTTP request/response handling and HTML pages
//! - **Middleware**: request logging and CORS
//! - **Router**: endpoint routing and composition
//!
//! ## Quick Start
//!
//! ```no_run
//! use playground_server::{app_state::AppState, router::create_app_router, AppConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let app_state = std::sync::Arc::new(AppState::new(AppConfig::default())?);
//!     let app = create_app_router(app_state);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod app_state;
pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod router;
pub mod services;
pub mod shutdown;
pub mod templates;

// Re-export commonly used types
pub use app_state::{AppConfig, AppState, Environment, LogFormat};
pub use error::{AppError, StoreError};
pub use models::Note;
pub use repositories::NoteStore;
