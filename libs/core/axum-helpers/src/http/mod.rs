//! HTTP middleware module.
//!
//! This module provides HTTP-level middleware for:
//! - CORS configuration
//! - Security headers
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{create_permissive_cors_layer, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(create_permissive_cors_layer());
//! ```

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue, Method, header},
    middleware::Next,
    response::Response,
};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Build a CORS layer from an explicit list of allowed origins.
///
/// Origins are passed as a comma-separated string, e.g.
/// `http://localhost:3000,https://example.com`. Invalid origin values are
/// rejected with an error message naming the offending value.
pub fn create_cors_layer(origins: &str) -> Result<CorsLayer, String> {
    let allowed_origins: Vec<HeaderValue> = origins
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>()
                .map_err(|e| format!("invalid CORS origin '{}': {}", s, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if allowed_origins.is_empty() {
        return Err("CORS origin list cannot be empty".to_string());
    }

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600)))
}

/// Permissive CORS layer for development: any origin, method, and header.
///
/// Credentials are NOT allowed (wildcard origin + credentials is rejected
/// by browsers and by tower-http).
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Middleware that attaches standard security headers to every response.
pub async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("no-referrer"),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_accepts_valid_origins() {
        let result = create_cors_layer("http://localhost:3000, https://example.com");
        assert!(result.is_ok());
    }

    #[test]
    fn test_cors_layer_rejects_empty_list() {
        let result = create_cors_layer(" , ");
        assert!(result.is_err());
    }

    #[test]
    fn test_cors_layer_rejects_invalid_origin() {
        let result = create_cors_layer("http://ok.example\u{0}bad");
        assert!(result.is_err());
    }
}
