use super::shutdown::shutdown_signal;
use crate::errors::handlers::not_found;
use crate::http::{create_cors_layer, create_permissive_cors_layer, security_headers};
use axum::{Json, Router, middleware, routing::get};
use core_config::server::ServerConfig;
use std::io;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Starts the Axum server with graceful shutdown.
///
/// # Errors
/// Returns an error if:
/// - The TCP listener fails to bind to the configured address
/// - The server encounters an error during operation
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    Ok(())
}

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - OpenAPI documentation (ReDoc at `/redoc`, RapiDoc at `/rapidoc`,
///   Scalar at `/scalar`, raw spec at `/api-docs/openapi.json`)
/// - API routes nested under `/api`
/// - Common middleware (tracing, security headers, CORS)
/// - 404 fallback handler
///
/// Note: Health endpoints (/health, /ready) should be added by the app
/// using `health_router()` and your own ready handler.
///
/// # CORS Configuration
///
/// When `CORS_ALLOWED_ORIGIN` is set it must contain comma-separated
/// allowed origins, e.g. `CORS_ALLOWED_ORIGIN=http://localhost:3000`.
/// When unset, a permissive CORS layer is used (development default).
///
/// Use this when your API routes already have state applied internally:
/// domain routers apply their own state, and this function combines them
/// with cross-cutting concerns.
///
/// # Type Parameters
/// * `T` - A type implementing `utoipa::OpenApi` for API documentation
///
/// # Errors
/// Returns an error if `CORS_ALLOWED_ORIGIN` is set but contains invalid
/// or empty values.
pub fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};

    let cors_layer = match std::env::var("CORS_ALLOWED_ORIGIN") {
        Ok(origins) => {
            info!("CORS configured with allowed origins: {}", origins);
            create_cors_layer(&origins).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
        }
        Err(_) => {
            info!("CORS_ALLOWED_ORIGIN not set, using permissive CORS");
            create_permissive_cors_layer()
        }
    };

    let openapi = T::openapi();

    let router = Router::new()
        .route(
            "/api-docs/openapi.json",
            get({
                let spec = openapi.clone();
                move || async move { Json(spec) }
            }),
        )
        .merge(Redoc::with_url("/redoc", openapi.clone()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", openapi))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer);

    Ok(router)
}
