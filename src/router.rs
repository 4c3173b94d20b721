use crate::{
    app_state::AppState,
    handlers::{api, note, pages},
    health,
    middleware::{cors_middleware, request_logging_middleware, CorsConfig},
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, services::ServeDir, timeout::TimeoutLayer};

type AppRouter = Router<Arc<AppState>>;

pub fn create_app_router(app_state: Arc<AppState>) -> Router {
    let cors_config = Arc::new(CorsConfig::for_app(&app_state.config));
    let request_timeout = app_state.config.request_timeout;
    let static_dir = app_state.config.static_dir.clone();

    Router::new()
        .merge(health_routes())
        .merge(api_routes())
        .merge(note_routes())
        .merge(page_routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                // Request logging (outermost, so it sees the final status)
                .layer(middleware::from_fn(request_logging_middleware))
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CompressionLayer::new())
                .layer(middleware::from_fn_with_state(cors_config, cors_middleware)),
        )
}

fn health_routes() -> AppRouter {
    Router::new()
        .route("/health", get(health::basic_health_check))
        .route("/health/live", get(health::liveness_probe))
}

fn api_routes() -> AppRouter {
    Router::new()
        .route("/api", get(api::hello))
        .route("/api/random", get(api::random_number))
        .route("/api/version", get(api::version))
        .route("/api/echo", post(api::echo))
}

fn note_routes() -> AppRouter {
    Router::new()
        .route("/api/notes", get(note::list_notes).post(note::create_note))
        .route("/api/notes/get", get(note::get_note_by_query))
        .route("/api/notes/delete", axum::routing::delete(note::delete_note_by_query))
        .route("/api/notes/:id", get(note::get_note).delete(note::delete_note))
        .route("/notes", get(note::notes_page))
        .route("/notes/create", post(note::create_note_from_form))
}

fn page_routes() -> AppRouter {
    Router::new()
        .route("/", get(pages::home))
        .route("/weather", get(pages::weather_page))
        .route("/currency", get(pages::currency_page))
}
