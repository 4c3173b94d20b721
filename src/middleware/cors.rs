use crate::app_state::{AppConfig, Environment};
use axum::{
    body::Body,
    extract::{Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
            ACCESS_CONTROL_EXPOSE_HEADERS, ACCESS_CONTROL_MAX_AGE, ORIGIN, VARY,
        },
        HeaderValue, Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<Method>,
    pub allowed_headers: Vec<String>,
    pub exposed_headers: Vec<String>,
    pub max_age: Option<u64>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            allowed_methods: vec![Method::GET, Method::POST, Method::DELETE, Method::OPTIONS],
            allowed_headers: vec![
                "content-type".to_string(),
                "accept".to_string(),
                "origin".to_string(),
                "x-requested-with".to_string(),
                "x-request-id".to_string(),
            ],
            exposed_headers: vec!["x-request-id".to_string(), "x-response-time".to_string()],
            max_age: Some(86400), // 24 hours
        }
    }
}

impl CorsConfig {
    pub fn development() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            ..Default::default()
        }
    }

    pub fn production(allowed_domains: Vec<String>) -> Self {
        Self {
            allowed_origins: allowed_domains,
            max_age: Some(3600),
            ..Default::default()
        }
    }

    /// Wildcard outside production; the configured origin list otherwise.
    pub fn for_app(config: &AppConfig) -> Self {
        match config.environment {
            Environment::Production => Self::production(config.cors_allowed_origins.clone()),
            Environment::Development | Environment::Testing => Self::development(),
        }
    }
}

pub async fn cors_middleware(
    State(config): State<Arc<CorsConfig>>,
    req: Request,
    next: Next,
) -> Response {
    let origin = req.headers().get(ORIGIN).cloned();

    if req.method() == Method::OPTIONS {
        return handle_preflight(origin.as_ref(), &config);
    }

    let mut response = next.run(req).await;
    add_cors_headers(&mut response, origin.as_ref(), &config);
    response
}

fn handle_preflight(origin: Option<&HeaderValue>, config: &CorsConfig) -> Response {
    let mut response = (StatusCode::NO_CONTENT, Body::empty()).into_response();
    let headers = response.headers_mut();

    if let Some(origin_value) = get_allowed_origin(origin, config) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin_value);
    }

    let methods = config
        .allowed_methods
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    if let Ok(value) = HeaderValue::from_str(&methods) {
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, value);
    }

    if let Ok(value) = HeaderValue::from_str(&config.allowed_headers.join(", ")) {
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, value);
    }

    if let Some(max_age) = config.max_age {
        headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from(max_age));
    }

    response
}

fn add_cors_headers(response: &mut Response, origin: Option<&HeaderValue>, config: &CorsConfig) {
    let headers = response.headers_mut();

    if let Some(origin_value) = get_allowed_origin(origin, config) {
        if origin_value != "*" {
            headers.insert(VARY, HeaderValue::from_static("origin"));
        }
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin_value);
    }

    if !config.exposed_headers.is_empty() {
        if let Ok(value) = HeaderValue::from_str(&config.exposed_headers.join(", ")) {
            headers.insert(ACCESS_CONTROL_EXPOSE_HEADERS, value);
        }
    }
}

fn get_allowed_origin(origin: Option<&HeaderValue>, config: &CorsConfig) -> Option<HeaderValue> {
    let origin_str = origin?.to_str().ok()?;

    if config.allowed_origins.iter().any(|o| o == "*") {
        return Some(HeaderValue::from_static("*"));
    }

    config
        .allowed_origins
        .iter()
        .any(|allowed| is_origin_match(origin_str, allowed))
        .then(|| HeaderValue::from_str(origin_str).ok())
        .flatten()
}

fn is_origin_match(origin: &str, pattern: &str) -> bool {
    // `*.example.com` matches subdomains only, never the bare domain
    if let Some(domain) = pattern.strip_prefix("*.") {
        let host = origin.split("://").nth(1).unwrap_or(origin);
        return host
            .strip_suffix(domain)
            .map(|prefix| prefix.ends_with('.'))
            .unwrap_or(false);
    }

    origin == pattern
}
