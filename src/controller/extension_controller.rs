use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::controller::AppState;
use crate::helpers::api_error::method_not_allowed_handler;
use crate::models::message::{ExtensionRequest, ExtensionResponse, SearchResultView};
use crate::models::place::Coordinate;
use crate::services::classifier::classify;
use crate::services::search::PlaceSearchService;
use crate::services::session::SearchSession;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/extension/message",
            post(handle_message).fallback(method_not_allowed_handler),
        )
        .route("/api/extension/events", get(selection_events))
        .route(
            "/api/extension/results",
            get(current_results).delete(clear_results),
        )
        .route_layer(Extension(app_state.search_service))
        .route_layer(Extension(app_state.session))
}

pub async fn handle_message(
    Extension(search_service): Extension<PlaceSearchService>,
    Extension(session): Extension<Arc<SearchSession>>,
    payload: Result<Json<ExtensionRequest>, JsonRejection>,
) -> Response {
    let message = match payload {
        Ok(Json(message)) => message,
        Err(rejection) => {
            warn!("Rejected extension message: {}", rejection.body_text());
            return Json(ExtensionResponse::failure(rejection.body_text())).into_response();
        }
    };

    match message {
        ExtensionRequest::AiSearch { query, location } => {
            Json(ai_search(&search_service, &session, query, location).await).into_response()
        }
        ExtensionRequest::SelectPlace { place_id } => {
            let delivered = session.select_place(&place_id).await;
            debug!("Forwarded selection of {} to {} tab(s)", place_id, delivered);
            StatusCode::ACCEPTED.into_response()
        }
    }
}

async fn ai_search(
    search_service: &PlaceSearchService,
    session: &SearchSession,
    query: Option<String>,
    location: Option<Coordinate>,
) -> ExtensionResponse {
    let Some(query) = query.filter(|q| !q.trim().is_empty()) else {
        return ExtensionResponse::failure("Query is required");
    };

    let intent = classify(&query);
    let ticket = session.begin();

    match search_service.search(&intent, location).await {
        Ok(places) => {
            if !session.complete(ticket, intent, places.clone()).await {
                debug!("Search #{} superseded by a newer search", ticket.sequence());
            }
            ExtensionResponse::success(places)
        }
        Err(e) => {
            warn!("Extension search failed due to: {}", e);
            ExtensionResponse::failure("Search failed")
        }
    }
}

/// Stands in for delivering `selectPlace` to the active tab.
pub async fn selection_events(
    Extension(session): Extension<Arc<SearchSession>>,
) -> Sse<impl Stream<Item = Result<Event, serde_json::Error>>> {
    let receiver = session.subscribe();

    let events = stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(selection) => {
                    let event = Event::default().event("selectPlace").json_data(&selection);
                    return Some((event, receiver));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Selection subscriber lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

pub async fn current_results(
    Extension(session): Extension<Arc<SearchSession>>,
) -> Json<Option<SearchResultView>> {
    Json(session.current().await)
}

/// Releases the displayed result set when the extension popup closes.
pub async fn clear_results(Extension(session): Extension<Arc<SearchSession>>) -> StatusCode {
    session.clear().await;
    StatusCode::NO_CONTENT
}
