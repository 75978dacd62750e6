use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{event, Level};

use crate::route::error::RouteError;

#[derive(Debug)]
pub enum ServerError {
    MissingParameter(&'static str),
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerError::MissingParameter(name) => {
                write!(f, "missing query parameter {name:?}")
            }
        }
    }
}

impl std::error::Error for ServerError {}

impl IntoResponse for crate::Error {
    fn into_response(self) -> Response {
        event!(Level::ERROR, name = ?self);

        let (code, message) = match &self {
            crate::Error::Route(RouteError::UnknownLocation(_))
            | crate::Error::Route(RouteError::NoPath { .. }) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            crate::Error::Route(RouteError::IdenticalStops(_))
            | crate::Error::Route(RouteError::InvalidCoordinate(_))
            | crate::Error::Route(RouteError::OutsideNetwork { .. })
            | crate::Error::Route(RouteError::NotEnoughStops)
            | crate::Error::Server(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            // Internal detail stays in the logs
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            ),
        };

        let body = serde_json::json!({ "error": message });
        Response::builder()
            .status(code)
            .header(axum::http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}
