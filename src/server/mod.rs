//! HTTP surface over the routing graph: axum handlers returning
//! GeoJSON and GPX, plus the CORS/timeout middleware the service
//! runs behind.

#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod handlers;
#[doc(hidden)]
pub mod response;
pub mod trace;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer, MaxAge};
use tower_http::timeout::TimeoutLayer;

use crate::config::Params;
use crate::route::Graph;

/// Upper bound on request handling.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// Process-wide immutable state: the graph is built once at startup
/// and shared read-only across request tasks.
pub struct AppState {
    pub graph: Graph,
    pub params: Params,
}

pub fn cors(origins: &str) -> CorsLayer {
    CorsLayer::new()
        .allow_methods(vec![Method::GET])
        .allow_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .allow_origin(AllowOrigin::list(
            origins.split(',').filter_map(|origin| origin.parse().ok()),
        ))
        .max_age(MaxAge::exact(Duration::new(3600, 0)))
}

pub fn router(state: Arc<AppState>) -> Router {
    let origins = state.params.allowed_origins.clone();

    Router::new()
        .route("/health", get(handlers::health))
        .route("/locations", get(handlers::locations))
        .route("/route", get(handlers::route))
        .route("/route.gpx", get(handlers::route_gpx))
        .layer(cors(&origins))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .with_state(state)
}
