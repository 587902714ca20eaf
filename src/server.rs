use axum::{
    Json, Router,
    http::{HeaderName, StatusCode},
    response::IntoResponse,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    app_state::AppState,
    extractor::Track,
    health::{self, HealthResponse},
    request::SortMode,
    tracks::{self, ErrorResponse},
};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(OpenApi)]
#[openapi(
    paths(health::health_check, tracks::handlers::list_tracks),
    components(schemas(Track, ErrorResponse, HealthResponse)),
    tags(
        (name = "tracks", description = "Catalog listings as JSON"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
}

/// Every route of the service, with request tracing and request ids.
pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(tracks::redirect_homepage))
        .route("/healthz", get(health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json));

    for mode in SortMode::ALL {
        router = router
            .route(&format!("/{}", mode.route()), get(tracks::list_tracks))
            .route(&format!("/{}/", mode.route()), get(tracks::list_tracks))
            .route(&format!("/{}/{{*filters}}", mode.route()), get(tracks::list_tracks));
    }

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    router.fallback(not_found).with_state(state).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(request_id)),
    )
}
