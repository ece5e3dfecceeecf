//! HTTP handlers for the consumption and statistics endpoints.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{ErrorResponse, ValidatedJson};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};
use uuid::Uuid;

use crate::error::{UsageError, UsageResult};
use crate::ledger::StockLedger;
use crate::models::{
    ConsumeRequest, ConsumptionItem, ConsumptionOutcome, ResourceFamily, UsageFilter, UsageRecord,
};
use crate::personnel::PersonnelDirectory;
use crate::repository::UsageRepository;
use crate::service::{ConsumptionService, StatisticsService};

/// OpenAPI documentation for the consumption endpoints
#[derive(OpenApi)]
#[openapi(
    paths(consume_ammunition, consume_fuel),
    components(
        schemas(
            ConsumeRequest,
            ConsumptionItem,
            ConsumptionResponse,
            UsageRecord,
            ResourceFamily,
            ErrorResponse
        )
    ),
    tags(
        (name = "consumption", description = "Resource consumption by soldiers")
    )
)]
pub struct ConsumptionApiDoc;

/// OpenAPI documentation for the statistics endpoints
#[derive(OpenApi)]
#[openapi(
    paths(weapon_statistics, fuel_statistics, usage_records),
    components(
        schemas(UsageRecord, ResourceFamily, ErrorResponse)
    ),
    tags(
        (name = "statistics", description = "Usage statistics and dashboards")
    )
)]
pub struct StatisticsApiDoc;

/// Response body for a consumption request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ConsumptionResponse {
    /// Whether the stock mutation was applied
    pub applied: bool,
    /// Whether every usage record was written
    pub usage_recorded: bool,
    /// Usage records written for this request
    pub records: Vec<UsageRecord>,
    /// Warning for the caller when the audit trail is incomplete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<&'static str>,
}

impl From<ConsumptionOutcome> for (StatusCode, ConsumptionResponse) {
    fn from(outcome: ConsumptionOutcome) -> Self {
        match outcome {
            ConsumptionOutcome::Applied { records } => (
                StatusCode::OK,
                ConsumptionResponse {
                    applied: true,
                    usage_recorded: true,
                    records,
                    warning: None,
                },
            ),
            // Stock was debited; only the audit write failed. 207 tells the
            // caller the operation stands but recording must be retried.
            ConsumptionOutcome::AppliedUnrecorded { records, .. } => (
                StatusCode::MULTI_STATUS,
                ConsumptionResponse {
                    applied: true,
                    usage_recorded: false,
                    records,
                    warning: Some("UsageNotRecorded"),
                },
            ),
        }
    }
}

/// Query parameters for the statistics endpoints.
#[derive(Debug, Deserialize, IntoParams)]
pub struct StatisticsQuery {
    /// Day to aggregate, ISO-8601 (YYYY-MM-DD)
    pub date: String,
    /// Restrict to one soldier
    pub soldier_id: Option<Uuid>,
}

/// Create the consumption router: one POST route per resource family.
pub fn consumption_router<L, P, U>(
    ammunition: ConsumptionService<L, P, U>,
    fuel: ConsumptionService<L, P, U>,
) -> Router
where
    L: StockLedger + 'static,
    P: PersonnelDirectory + 'static,
    U: UsageRepository + 'static,
{
    Router::new()
        .merge(
            Router::new()
                .route("/ammunition", post(consume_ammunition))
                .with_state(Arc::new(ammunition)),
        )
        .merge(
            Router::new()
                .route("/fuel", post(consume_fuel))
                .with_state(Arc::new(fuel)),
        )
}

/// Create the statistics router.
pub fn statistics_router<U: UsageRepository + 'static>(service: StatisticsService<U>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/weapons", get(weapon_statistics))
        .route("/fuel", get(fuel_statistics))
        .route("/records", get(usage_records))
        .with_state(shared_service)
}

/// Consume ammunition stock for a soldier
#[utoipa::path(
    post,
    path = "/ammunition",
    tag = "consumption",
    request_body = ConsumeRequest,
    responses(
        (status = 200, description = "Stock debited and usage recorded", body = ConsumptionResponse),
        (status = 207, description = "Stock debited, usage recording incomplete", body = ConsumptionResponse),
        (status = 400, description = "Invalid request or unknown kind", body = ErrorResponse),
        (status = 404, description = "Unknown soldier", body = ErrorResponse),
        (status = 409, description = "Insufficient stock", body = ErrorResponse),
        (status = 503, description = "Ledger or recorder unavailable", body = ErrorResponse)
    )
)]
pub async fn consume_ammunition<L, P, U>(
    State(service): State<Arc<ConsumptionService<L, P, U>>>,
    ValidatedJson(request): ValidatedJson<ConsumeRequest>,
) -> UsageResult<impl IntoResponse>
where
    L: StockLedger,
    P: PersonnelDirectory,
    U: UsageRepository,
{
    let outcome = service.consume(request).await?;
    let (status, body): (StatusCode, ConsumptionResponse) = outcome.into();
    Ok((status, Json(body)))
}

/// Consume fuel stock for a soldier
#[utoipa::path(
    post,
    path = "/fuel",
    tag = "consumption",
    request_body = ConsumeRequest,
    responses(
        (status = 200, description = "Stock debited and usage recorded", body = ConsumptionResponse),
        (status = 207, description = "Stock debited, usage recording incomplete", body = ConsumptionResponse),
        (status = 400, description = "Invalid request or unknown kind", body = ErrorResponse),
        (status = 404, description = "Unknown soldier", body = ErrorResponse),
        (status = 409, description = "Insufficient stock", body = ErrorResponse),
        (status = 503, description = "Ledger or recorder unavailable", body = ErrorResponse)
    )
)]
pub async fn consume_fuel<L, P, U>(
    State(service): State<Arc<ConsumptionService<L, P, U>>>,
    ValidatedJson(request): ValidatedJson<ConsumeRequest>,
) -> UsageResult<impl IntoResponse>
where
    L: StockLedger,
    P: PersonnelDirectory,
    U: UsageRepository,
{
    let outcome = service.consume(request).await?;
    let (status, body): (StatusCode, ConsumptionResponse) = outcome.into();
    Ok((status, Json(body)))
}

fn parse_date(date: &str) -> UsageResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| UsageError::Validation(format!("date '{}' is not a valid YYYY-MM-DD day", date)))
}

/// Per-kind ammunition totals for one day
#[utoipa::path(
    get,
    path = "/weapons",
    tag = "statistics",
    params(StatisticsQuery),
    responses(
        (status = 200, description = "Totals per kind", body = BTreeMap<String, u64>),
        (status = 400, description = "Missing or unparsable date", body = ErrorResponse)
    )
)]
pub async fn weapon_statistics<U: UsageRepository>(
    State(service): State<Arc<StatisticsService<U>>>,
    Query(query): Query<StatisticsQuery>,
) -> UsageResult<Json<BTreeMap<String, u64>>> {
    let date = parse_date(&query.date)?;
    let totals = service
        .statistics(ResourceFamily::Ammunition, date, query.soldier_id)
        .await?;
    Ok(Json(totals))
}

/// Per-kind fuel totals for one day
#[utoipa::path(
    get,
    path = "/fuel",
    tag = "statistics",
    params(StatisticsQuery),
    responses(
        (status = 200, description = "Totals per kind", body = BTreeMap<String, u64>),
        (status = 400, description = "Missing or unparsable date", body = ErrorResponse)
    )
)]
pub async fn fuel_statistics<U: UsageRepository>(
    State(service): State<Arc<StatisticsService<U>>>,
    Query(query): Query<StatisticsQuery>,
) -> UsageResult<Json<BTreeMap<String, u64>>> {
    let date = parse_date(&query.date)?;
    let totals = service
        .statistics(ResourceFamily::Fuel, date, query.soldier_id)
        .await?;
    Ok(Json(totals))
}

/// Raw usage records for a date range / soldier
#[utoipa::path(
    get,
    path = "/records",
    tag = "statistics",
    params(UsageFilter),
    responses(
        (status = 200, description = "Matching usage records", body = Vec<UsageRecord>)
    )
)]
pub async fn usage_records<U: UsageRepository>(
    State(service): State<Arc<StatisticsService<U>>>,
    Query(filter): Query<UsageFilter>,
) -> UsageResult<Json<Vec<UsageRecord>>> {
    let records = service.records(filter).await?;
    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{LedgerFault, StockLevel};
    use crate::memory::InMemoryUsageLog;
    use crate::personnel::OpenRoster;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Utc;
    use std::sync::Mutex;
    use tower::ServiceExt;

    struct FakeLedger {
        levels: Mutex<Vec<StockLevel>>,
    }

    impl FakeLedger {
        fn with_levels<I, K>(seed: I) -> Self
        where
            I: IntoIterator<Item = (K, u64)>,
            K: Into<String>,
        {
            Self {
                levels: Mutex::new(
                    seed.into_iter()
                        .map(|(kind, quantity)| StockLevel {
                            kind: kind.into(),
                            quantity,
                        })
                        .collect(),
                ),
            }
        }
    }

    #[async_trait::async_trait]
    impl StockLedger for FakeLedger {
        async fn snapshot(&self) -> Result<Vec<StockLevel>, LedgerFault> {
            Ok(self.levels.lock().unwrap().clone())
        }

        async fn add(&self, kind: &str, amount: u64) -> Result<(), LedgerFault> {
            let mut levels = self.levels.lock().unwrap();
            let level = levels
                .iter_mut()
                .find(|l| l.kind == kind)
                .ok_or_else(|| LedgerFault::UnknownKind(kind.to_string()))?;
            level.quantity += amount;
            Ok(())
        }

        async fn sub(&self, kind: &str, amount: u64) -> Result<(), LedgerFault> {
            let mut levels = self.levels.lock().unwrap();
            let level = levels
                .iter_mut()
                .find(|l| l.kind == kind)
                .ok_or_else(|| LedgerFault::UnknownKind(kind.to_string()))?;
            if level.quantity < amount {
                return Err(LedgerFault::Insufficient {
                    kind: kind.to_string(),
                    available: level.quantity,
                    requested: amount,
                });
            }
            level.quantity -= amount;
            Ok(())
        }
    }

    fn test_app() -> Router {
        let usage = Arc::new(InMemoryUsageLog::new());
        let personnel = Arc::new(OpenRoster);

        let ammunition = ConsumptionService::new(
            ResourceFamily::Ammunition,
            Arc::new(FakeLedger::with_levels([
                ("weapon", 10),
                ("military vehicle", 5),
            ])),
            Arc::clone(&personnel),
            Arc::clone(&usage),
        );
        let fuel = ConsumptionService::new(
            ResourceFamily::Fuel,
            Arc::new(FakeLedger::with_levels([("diesel", 100), ("petrol", 50)])),
            Arc::clone(&personnel),
            Arc::clone(&usage),
        );

        Router::new()
            .nest("/consumption", consumption_router(ammunition, fuel))
            .nest(
                "/statistics",
                statistics_router(StatisticsService::new(usage)),
            )
    }

    fn consume_request(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_consume_then_statistics_round_trip() {
        let app = test_app();
        let soldier = Uuid::new_v4();

        let body = format!(
            r#"{{"soldier_id": "{soldier}", "items": [{{"kind": "weapon", "amount": 4}}]}}"#
        );
        let response = app
            .clone()
            .oneshot(consume_request("/consumption/ammunition", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let today = Utc::now().date_naive().format("%Y-%m-%d");
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/statistics/weapons?date={today}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_overdraw_returns_conflict() {
        let app = test_app();
        let soldier = Uuid::new_v4();

        let body = format!(
            r#"{{"soldier_id": "{soldier}", "items": [{{"kind": "diesel", "amount": 500}}]}}"#
        );
        let response = app
            .oneshot(consume_request("/consumption/fuel", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_empty_items_is_bad_request() {
        let app = test_app();
        let soldier = Uuid::new_v4();

        let body = format!(r#"{{"soldier_id": "{soldier}", "items": []}}"#);
        let response = app
            .oneshot(consume_request("/consumption/ammunition", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_statistics_with_malformed_date_is_bad_request() {
        let app = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/statistics/fuel?date=not-a-day")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_statistics_without_date_is_bad_request() {
        let app = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/statistics/weapons")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_usage_records_listing() {
        let app = test_app();
        let soldier = Uuid::new_v4();

        let body = format!(
            r#"{{"soldier_id": "{soldier}", "items": [{{"kind": "petrol", "amount": 20}}]}}"#
        );
        app.clone()
            .oneshot(consume_request("/consumption/fuel", body))
            .await
            .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/statistics/records?soldier_id={soldier}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
