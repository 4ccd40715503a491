use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::controller::AppState;
use crate::services::search::PlaceSearchService;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(get_health_check))
        .route_layer(Extension(app_state.search_service))
}

#[derive(Clone, Serialize, Debug)]
pub struct HealthData {
    status: &'static str,
    backend: &'static str,
    mode: &'static str,
}

/// Reports which place source a search would hit right now.
async fn get_health_check(
    Extension(search_service): Extension<PlaceSearchService>,
) -> (StatusCode, Json<HealthData>) {
    let backend = search_service.backend_kind().as_str();

    match search_service.select_backend().await {
        Ok(selected) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                backend,
                mode: if selected.is_live() { "live" } else { "mock" },
            }),
        ),
        Err(e) => {
            warn!("Health check could not read settings: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    backend,
                    mode: "unavailable",
                }),
            )
        }
    }
}
