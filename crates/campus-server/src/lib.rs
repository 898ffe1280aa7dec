//! HTTP server wiring for the campus posts API.
//!
//! Owns the runtime configuration and mounts [`campus_api::api_router`] under
//! `/api` with request tracing.

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use campus_api::{ApiState, AuthConfig};
use campus_core::{Locale, store::PostStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CAMPUS_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// HMAC secret used to verify bearer tokens.
  pub jwt_secret: String,
  #[serde(default)]
  pub locale:     Locale,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API state for `store` from `config`.
pub fn state<S>(store: S, config: &ServerConfig) -> ApiState<S> {
  ApiState {
    store:  Arc::new(store),
    auth:   Arc::new(AuthConfig {
      jwt_secret: config.jwt_secret.clone(),
    }),
    locale: config.locale,
  }
}

/// Build the top-level router: the JSON API under `/api`, traced.
pub fn router<S>(state: ApiState<S>) -> Router
where
  S: PostStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .nest("/api", campus_api::api_router(state))
    .layer(TraceLayer::new_for_http())
}
