use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::routing::get;
use axum::{Extension, Json, Router};
use tracing::error;

use crate::controller::AppState;
use crate::helpers::api_error::{method_not_allowed_handler, ApiError};
use crate::models::settings::Settings;
use crate::repositories::settings_repo::SettingsRepo;

pub fn router(app_state: AppState) -> Router {
    let settings_repo = Arc::clone(app_state.search_service.settings());

    Router::new()
        .route(
            "/api/settings",
            get(retrieve_settings)
                .put(update_settings)
                .fallback(method_not_allowed_handler),
        )
        .route_layer(Extension(settings_repo))
}

pub async fn retrieve_settings(
    Extension(settings_repo): Extension<Arc<SettingsRepo>>,
) -> Result<Json<Settings>, ApiError> {
    settings_repo.load().await.map(Json).map_err(|e| {
        error!("Failed to read settings due to: {}", e);
        ApiError::internal("Failed to read settings")
    })
}

pub async fn update_settings(
    Extension(settings_repo): Extension<Arc<SettingsRepo>>,
    payload: Result<Json<Settings>, JsonRejection>,
) -> Result<Json<Settings>, ApiError> {
    let Json(body) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    settings_repo
        .save_places_api_key(body.places_api_key.as_deref())
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to save settings due to: {}", e);
            ApiError::internal("Failed to save settings")
        })
}
