use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::Level;

use crate::route::gpx::{filename, write_gpx};
use crate::route::{Anchor, Itinerary};
use crate::server::error::ServerError;
use crate::server::{response, AppState};

pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "junctions": state.graph.size(),
        "locations": state.graph.location_names().len(),
    }))
}

/// The sorted place names backing the origin/destination datalist.
pub async fn locations(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.graph.location_names())
}

#[tracing::instrument(skip(state), err(level = Level::WARN))]
pub async fn route(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> crate::Result<Json<geojson::FeatureCollection>> {
    let itinerary = compute(&state, &pairs)?;
    Ok(Json(response::feature_collection(&itinerary)))
}

#[tracing::instrument(skip(state), err(level = Level::WARN))]
pub async fn route_gpx(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> crate::Result<Response> {
    let itinerary = compute(&state, &pairs)?;
    let bytes = write_gpx(&itinerary)?;

    // Header values must stay ASCII; accented place names are dropped
    let name: String = filename(&itinerary)
        .chars()
        .filter(|c| c.is_ascii_graphic() && *c != '"')
        .collect();

    Ok(Response::builder()
        .header(header::CONTENT_TYPE, "application/gpx+xml")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{name}\""),
        )
        .body(Body::from(bytes))
        .unwrap_or_else(|_| axum::http::StatusCode::INTERNAL_SERVER_ERROR.into_response()))
}

fn compute(state: &AppState, pairs: &[(String, String)]) -> crate::Result<Itinerary> {
    let anchors = parse_anchors(pairs)?;
    let itinerary = state.graph.route(&anchors, state.params.max_snap_m)?;
    Ok(itinerary)
}

/// Assembles the stop sequence `[from, via.., to]` from the query
/// string. `via` may repeat and keeps its order; empty values are
/// ignored, matching an empty form field.
pub(crate) fn parse_anchors(pairs: &[(String, String)]) -> Result<Vec<Anchor>, ServerError> {
    let mut from = None;
    let mut to = None;
    let mut via = Vec::new();

    for (key, value) in pairs {
        if value.trim().is_empty() {
            continue;
        }

        match key.as_str() {
            "from" => from = Some(Anchor::parse(value)),
            "to" => to = Some(Anchor::parse(value)),
            "via" => via.push(Anchor::parse(value)),
            _ => {}
        }
    }

    let from = from.ok_or(ServerError::MissingParameter("from"))?;
    let to = to.ok_or(ServerError::MissingParameter("to"))?;

    let mut anchors = Vec::with_capacity(via.len() + 2);
    anchors.push(from);
    anchors.extend(via);
    anchors.push(to);
    Ok(anchors)
}
