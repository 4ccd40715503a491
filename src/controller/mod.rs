use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::helpers::handler_404::page_not_found_handler;
use crate::services::search::PlaceSearchService;
use crate::services::session::SearchSession;

pub mod extension_controller;
pub mod health_check;
pub mod places_controller;
pub mod search_controller;
pub mod settings_controller;

#[derive(Clone)]
pub struct AppState {
    pub search_service: PlaceSearchService,
    pub session: Arc<SearchSession>,
}

impl AppState {
    pub fn new(search_service: PlaceSearchService) -> Self {
        Self {
            search_service,
            session: Arc::new(SearchSession::new()),
        }
    }
}

pub async fn serve(app_state: AppState, config: &Config) -> anyhow::Result<()> {
    let session = Arc::clone(&app_state.session);
    let application = router_endpoints(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(build_cors(&config.origin_urls)),
    );

    let address = SocketAddr::new(config.host, config.port);
    info!("API server listening on: {}", address);
    axum::Server::try_bind(&address)
        .with_context(|| format!("Failed to bind API server to {}", address))?
        .serve(application.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Error spinning up the API server")?;

    session.clear().await;
    info!("Released search session state");
    Ok(())
}

pub fn router_endpoints(app_state: AppState) -> Router {
    health_check::router(app_state.clone())
        .merge(search_controller::router(app_state.clone()))
        .merge(extension_controller::router(app_state.clone()))
        .merge(places_controller::router(app_state.clone()))
        .merge(settings_controller::router(app_state))
        .fallback(page_not_found_handler)
}

fn build_cors(origin_urls: &str) -> CorsLayer {
    let allow_origin = if origin_urls.trim() == "*" {
        AllowOrigin::any()
    } else {
        let origins = origin_urls
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| match s.parse::<HeaderValue>() {
                Ok(origin) => Some(origin),
                Err(e) => {
                    warn!("Ignoring invalid CORS origin {}: {}", s, e);
                    None
                }
            })
            .collect::<Vec<HeaderValue>>();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_origin(allow_origin)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Received shutdown signal, stopping API server");
}
