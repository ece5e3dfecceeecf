//! Readiness checks against the in-process stores.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use serde_json::Value;

use domain_inventory::CounterFilter;
use domain_usage::{UsageFilter, UsageRepository};

use crate::state::AppState;

/// Readiness endpoint: probes every ledger and the usage log.
///
/// The probes are the same read paths request handling uses, so a
/// poisoned store shows up here before it shows up as request failures.
pub async fn ready_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![
        (
            "ammunition_ledger",
            Box::pin(async {
                state
                    .ammunition
                    .list_counters(CounterFilter::default())
                    .await
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            }),
        ),
        (
            "fuel_ledger",
            Box::pin(async {
                state
                    .fuel
                    .list_counters(CounterFilter::default())
                    .await
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            }),
        ),
        (
            "vehicle_ledger",
            Box::pin(async {
                state
                    .vehicles
                    .list_counters(CounterFilter::default())
                    .await
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            }),
        ),
        (
            "usage_log",
            Box::pin(async {
                state
                    .usage_log
                    .query(UsageFilter::default())
                    .await
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            }),
        ),
    ];

    run_health_checks(checks).await
}
