//! API module
//!
//! HTTP API endpoints, middleware and router assembly.

pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::{middleware as axum_middleware, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::pluggy::{PluggyClient, PluggyError};

pub use routes::create_router;

/// Shared, read-only state handed to every request
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pluggy: PluggyClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, PluggyError> {
        let pluggy = PluggyClient::from_config(&config)?;
        Ok(Self {
            config: Arc::new(config),
            pluggy,
        })
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // Layers run last-added first: context -> logging -> handler
    let router = create_router()
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(axum_middleware::from_fn(middleware::context_middleware))
        .layer(TraceLayer::new_for_http());

    let router = match cors_layer(&state.config) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.with_state(state)
}

/// CORS for the configured widget origins, if any
fn cors_layer(config: &Config) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([
                header::CONTENT_TYPE,
                HeaderName::from_static(middleware::CORRELATION_ID_HEADER),
            ])
            .expose_headers([HeaderName::from_static(middleware::CORRELATION_ID_HEADER)]),
    )
}
