use utoipa::OpenApi;

/// Aggregated OpenAPI documentation for the gateway.
///
/// The catalog document is nested once per resource family; consumption
/// and statistics carry their own documents from the usage domain.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quartermaster API",
        description = "Logistics gateway: resource catalogs, consumption coordination, and usage statistics for a military-unit management platform",
    ),
    nest(
        (path = "/api/ammunition", api = domain_inventory::handlers::ApiDoc),
        (path = "/api/fuel", api = domain_inventory::handlers::ApiDoc),
        (path = "/api/vehicles", api = domain_inventory::handlers::ApiDoc),
        (path = "/api/consumption", api = domain_usage::handlers::ConsumptionApiDoc),
        (path = "/api/statistics", api = domain_usage::handlers::StatisticsApiDoc),
    ),
    components(schemas(axum_helpers::ErrorResponse))
)]
pub struct ApiDoc;
