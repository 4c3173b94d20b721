use axum::{
    extract::{ConnectInfo, Request},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::{net::SocketAddr, time::Instant};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const RESPONSE_TIME_HEADER: &str = "x-response-time";

const SLOW_REQUEST_MS: u128 = 1000;

// Request logging middleware with request ids and response timing
pub async fn request_logging_middleware(
    connect_info: Option<ConnectInfo<SocketAddr>>,
    mut req: Request,
    next: Next,
) -> Response {
    let start_time = Instant::now();

    // Keep a caller-supplied id so traces can be joined across services.
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let method = req.method().clone();
    let uri = req.uri().clone();
    let client_ip = get_client_ip(req.headers(), connect_info.map(|ConnectInfo(addr)| addr));

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        req.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    debug!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        client_ip = %client_ip,
        user_agent = %req.headers().get("user-agent").and_then(|h| h.to_str().ok()).unwrap_or("unknown"),
        "Request started"
    );

    let mut response = next.run(req).await;

    let duration = start_time.elapsed();
    let status = response.status();

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    if let Ok(value) = HeaderValue::from_str(&format!("{}ms", duration.as_millis())) {
        response.headers_mut().insert(RESPONSE_TIME_HEADER, value);
    }

    match status.as_u16() {
        200..=399 => info!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status = %status,
            duration_ms = %duration.as_millis(),
            client_ip = %client_ip,
            "Request completed"
        ),
        400..=499 => warn!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status = %status,
            duration_ms = %duration.as_millis(),
            client_ip = %client_ip,
            "Request completed with client error"
        ),
        500..=599 => error!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status = %status,
            duration_ms = %duration.as_millis(),
            client_ip = %client_ip,
            "Request completed with server error"
        ),
        _ => debug!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status = %status,
            duration_ms = %duration.as_millis(),
            client_ip = %client_ip,
            "Request completed"
        ),
    }

    if duration.as_millis() > SLOW_REQUEST_MS {
        warn!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            duration_ms = %duration.as_millis(),
            "Slow request detected"
        );
    }

    response
}

// Extracts the real client IP, preferring proxy headers over the socket peer
fn get_client_ip(headers: &HeaderMap, addr: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|h| h.to_str().ok()) {
        if let Some(ip) = forwarded.split(',').next() {
            return ip.trim().to_string();
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|h| h.to_str().ok()) {
        return real_ip.to_string();
    }

    if let Some(forwarded) = headers.get("forwarded").and_then(|h| h.to_str().ok()) {
        // RFC 7239
        for pair in forwarded.split(';') {
            if let Some(for_part) = pair.trim().strip_prefix("for=") {
                if let Some(ip) = for_part.split(',').next() {
                    return ip.trim().trim_matches('"').to_string();
                }
            }
        }
    }

    addr.map(|a| a.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
