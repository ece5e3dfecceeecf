//! HTTP handlers for the ledger catalog endpoints.
//!
//! One router instance is mounted per resource family; the handlers are
//! generic over the repository so tests can bind fakes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use axum_helpers::{ErrorResponse, UuidPath, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::LedgerResult;
use crate::models::{CounterFilter, CreateCounter, ResourceCounter, StockAdjustment, UpdateCounter};
use crate::repository::LedgerRepository;
use crate::service::LedgerService;

/// OpenAPI documentation for one ledger catalog
#[derive(OpenApi)]
#[openapi(
    paths(
        list_counters,
        create_counter,
        get_counter,
        update_counter,
        delete_counter,
        add_stock,
        sub_stock,
    ),
    components(
        schemas(ResourceCounter, CreateCounter, UpdateCounter, StockAdjustment, ErrorResponse)
    ),
    tags(
        (name = "catalog", description = "Resource catalog endpoints (one ledger per family)")
    )
)]
pub struct ApiDoc;

/// Create the catalog router for one ledger
pub fn router<R: LedgerRepository + 'static>(service: LedgerService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_counters).post(create_counter))
        .route(
            "/{id}",
            get(get_counter).put(update_counter).delete(delete_counter),
        )
        .route("/add", put(add_stock))
        .route("/sub", put(sub_stock))
        .with_state(shared_service)
}

/// List counters in registration order
#[utoipa::path(
    get,
    path = "",
    tag = "catalog",
    params(CounterFilter),
    responses(
        (status = 200, description = "List of counters", body = Vec<ResourceCounter>),
        (status = 503, description = "Ledger unavailable", body = ErrorResponse)
    )
)]
pub async fn list_counters<R: LedgerRepository>(
    State(service): State<Arc<LedgerService<R>>>,
    Query(filter): Query<CounterFilter>,
) -> LedgerResult<Json<Vec<ResourceCounter>>> {
    let counters = service.list_counters(filter).await?;
    Ok(Json(counters))
}

/// Register a new counter
#[utoipa::path(
    post,
    path = "",
    tag = "catalog",
    request_body = CreateCounter,
    responses(
        (status = 201, description = "Counter created", body = ResourceCounter),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Duplicate kind", body = ErrorResponse)
    )
)]
pub async fn create_counter<R: LedgerRepository>(
    State(service): State<Arc<LedgerService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCounter>,
) -> LedgerResult<impl IntoResponse> {
    let counter = service.create_counter(input).await?;
    Ok((StatusCode::CREATED, Json(counter)))
}

/// Get a counter by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "catalog",
    params(
        ("id" = String, Path, description = "Counter ID")
    ),
    responses(
        (status = 200, description = "Counter found", body = ResourceCounter),
        (status = 400, description = "Invalid counter ID", body = ErrorResponse),
        (status = 404, description = "Counter not found", body = ErrorResponse)
    )
)]
pub async fn get_counter<R: LedgerRepository>(
    State(service): State<Arc<LedgerService<R>>>,
    UuidPath(id): UuidPath,
) -> LedgerResult<Json<ResourceCounter>> {
    let counter = service.get_counter(id).await?;
    Ok(Json(counter))
}

/// Update a counter
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "catalog",
    params(
        ("id" = String, Path, description = "Counter ID")
    ),
    request_body = UpdateCounter,
    responses(
        (status = 200, description = "Counter updated", body = ResourceCounter),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Counter not found", body = ErrorResponse)
    )
)]
pub async fn update_counter<R: LedgerRepository>(
    State(service): State<Arc<LedgerService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCounter>,
) -> LedgerResult<Json<ResourceCounter>> {
    let counter = service.update_counter(id, input).await?;
    Ok(Json(counter))
}

/// Delete a counter
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "catalog",
    params(
        ("id" = String, Path, description = "Counter ID")
    ),
    responses(
        (status = 204, description = "Counter deleted"),
        (status = 400, description = "Invalid counter ID", body = ErrorResponse),
        (status = 404, description = "Counter not found", body = ErrorResponse)
    )
)]
pub async fn delete_counter<R: LedgerRepository>(
    State(service): State<Arc<LedgerService<R>>>,
    UuidPath(id): UuidPath,
) -> LedgerResult<impl IntoResponse> {
    service.delete_counter(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add stock to one kind
#[utoipa::path(
    put,
    path = "/add",
    tag = "catalog",
    request_body = StockAdjustment,
    responses(
        (status = 200, description = "Stock increased", body = ResourceCounter),
        (status = 400, description = "Invalid amount or unknown kind", body = ErrorResponse)
    )
)]
pub async fn add_stock<R: LedgerRepository>(
    State(service): State<Arc<LedgerService<R>>>,
    ValidatedJson(input): ValidatedJson<StockAdjustment>,
) -> LedgerResult<Json<ResourceCounter>> {
    let counter = service.add_stock(input).await?;
    Ok(Json(counter))
}

/// Subtract stock from one kind
#[utoipa::path(
    put,
    path = "/sub",
    tag = "catalog",
    request_body = StockAdjustment,
    responses(
        (status = 200, description = "Stock decreased", body = ResourceCounter),
        (status = 400, description = "Invalid amount or unknown kind", body = ErrorResponse),
        (status = 409, description = "Insufficient stock", body = ErrorResponse)
    )
)]
pub async fn sub_stock<R: LedgerRepository>(
    State(service): State<Arc<LedgerService<R>>>,
    ValidatedJson(input): ValidatedJson<StockAdjustment>,
) -> LedgerResult<Json<ResourceCounter>> {
    let counter = service.sub_stock(input).await?;
    Ok(Json(counter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryLedger;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let service = LedgerService::new(InMemoryLedger::with_counters([("weapon", 10)]));
        router(service)
    }

    #[tokio::test]
    async fn test_list_returns_seeded_counters() {
        let response = test_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_sub_beyond_stock_returns_conflict() {
        let request = Request::builder()
            .method("PUT")
            .uri("/sub")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"kind": "weapon", "amount": 99}"#))
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_add_with_zero_amount_is_rejected_by_validation() {
        let request = Request::builder()
            .method("PUT")
            .uri("/add")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"kind": "weapon", "amount": 0}"#))
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_with_malformed_uuid_is_bad_request() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
