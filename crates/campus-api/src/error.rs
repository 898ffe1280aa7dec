//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body has the shape `{"message": "<text>"}`; the status code
//! carries the kind.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use campus_core::{Error, Locale};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// A client-visible rejection, rendered in `locale`.
  #[error("{error}")]
  Rejected { error: Error, locale: Locale },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Rejected { error, locale } => {
        let status = StatusCode::from_u16(error.status())
          .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = locale.text(error.message());
        (status, Json(json!({ "message": message }))).into_response()
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "message": "Internal server error." })),
        )
          .into_response()
      }
    }
  }
}
