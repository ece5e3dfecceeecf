use axum::Router;
use std::sync::Arc;

pub mod health;

use domain_inventory::handlers as catalog;
use domain_usage::handlers::{consumption_router, statistics_router};
use domain_usage::{ConsumptionService, ResourceFamily, StatisticsService};

use crate::adapters::CatalogLedger;
use crate::state::AppState;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// This function takes a reference to AppState and initializes all
/// services. Returns a stateless Router (all sub-routers have state
/// already applied); only Arc pointer clones remain.
pub fn routes(state: &AppState) -> Router {
    let ammunition = ConsumptionService::new(
        ResourceFamily::Ammunition,
        Arc::new(CatalogLedger::new(state.ammunition.clone())),
        Arc::clone(&state.personnel),
        Arc::clone(&state.usage_log),
    );
    let fuel = ConsumptionService::new(
        ResourceFamily::Fuel,
        Arc::new(CatalogLedger::new(state.fuel.clone())),
        Arc::clone(&state.personnel),
        Arc::clone(&state.usage_log),
    );
    let statistics = StatisticsService::new(Arc::clone(&state.usage_log));

    Router::new()
        .nest("/ammunition", catalog::router(state.ammunition.clone()))
        .nest("/fuel", catalog::router(state.fuel.clone()))
        .nest("/vehicles", catalog::router(state.vehicles.clone()))
        .nest("/consumption", consumption_router(ammunition, fuel))
        .nest("/statistics", statistics_router(statistics))
}

/// Creates a router with the /ready endpoint that performs actual health
/// checks against the ledgers and the usage log.
pub fn ready_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use uuid::Uuid;

    fn test_state() -> AppState {
        let config = Config {
            app: core_config::app_info!(),
            server: core_config::server::ServerConfig::default(),
            environment: core_config::Environment::Development,
            seed: crate::config::SeedConfig {
                ammunition: vec![
                    ("weapon".to_string(), 10),
                    ("military vehicle".to_string(), 5),
                ],
                fuel: vec![("diesel".to_string(), 100), ("petrol".to_string(), 50)],
                vehicles: vec![("truck".to_string(), 3)],
            },
        };
        AppState::from_config(config)
    }

    #[tokio::test]
    async fn test_catalog_routes_are_mounted_per_family() {
        let app = routes(&test_state());

        for uri in ["/ammunition", "/fuel", "/vehicles"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "listing {uri}");
        }
    }

    #[tokio::test]
    async fn test_consumption_debits_the_family_ledger() {
        let state = test_state();
        let app = routes(&state);
        let soldier = Uuid::new_v4();

        let body = format!(
            r#"{{"soldier_id": "{soldier}", "items": [{{"kind": "weapon", "amount": 4}}, {{"kind": "military vehicle", "amount": 2}}]}}"#
        );
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/consumption/ammunition")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let weapon = state
            .ammunition
            .list_counters(domain_inventory::CounterFilter {
                kind: Some("weapon".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(weapon[0].quantity, 6);
    }

    #[tokio::test]
    async fn test_overdraw_is_conflict_and_ledger_unchanged() {
        let state = test_state();
        let app = routes(&state);
        let soldier = Uuid::new_v4();

        // "military vehicle" has only 5; the whole request must be refused.
        let body = format!(
            r#"{{"soldier_id": "{soldier}", "items": [{{"kind": "weapon", "amount": 4}}, {{"kind": "military vehicle", "amount": 9}}]}}"#
        );
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/consumption/ammunition")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let weapon = state
            .ammunition
            .list_counters(domain_inventory::CounterFilter {
                kind: Some("weapon".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(weapon[0].quantity, 10);
    }

    #[tokio::test]
    async fn test_fuel_and_ammunition_ledgers_are_independent_namespaces() {
        let app = routes(&test_state());
        let soldier = Uuid::new_v4();

        // "diesel" is a fuel kind; the ammunition coordinator must not see it.
        let body = format!(
            r#"{{"soldier_id": "{soldier}", "items": [{{"kind": "diesel", "amount": 1}}]}}"#
        );
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/consumption/ammunition")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ready_reports_ok_for_in_process_stores() {
        let app = ready_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
