//! JSON REST API for campus posts.
//!
//! Exposes an axum [`Router`] backed by any [`campus_core::store::PostStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", campus_api::api_router(state))
//! ```

pub mod auth;
pub mod error;
pub mod posts;

use std::sync::Arc;

use axum::{
  Router,
  extract::State,
  routing::get,
};
use campus_core::{Error, Locale, store::PostStore};

pub use auth::{AuthConfig, Caller};
pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers. Everything in it is immutable
/// after startup.
#[derive(Clone)]
pub struct ApiState<S> {
  pub store:  Arc<S>,
  pub auth:   Arc<AuthConfig>,
  /// Language of every `message` this API returns.
  pub locale: Locale,
}

impl<S> ApiState<S> {
  /// Wrap `error` for rendering in this state's locale.
  pub fn reject(&self, error: Error) -> ApiError {
    ApiError::Rejected {
      error,
      locale: self.locale,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type. Unsupported methods on a known path get a 405 with
/// a JSON body.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: PostStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route(
      "/posts",
      get(posts::list::<S>)
        .post(posts::create::<S>)
        .fallback(method_not_allowed::<S>),
    )
    .route(
      "/posts/{id}",
      get(posts::get_one::<S>)
        .delete(posts::delete_one::<S>)
        .fallback(method_not_allowed::<S>),
    )
    .route(
      "/posts/{id}/comments",
      get(posts::comments::<S>).fallback(method_not_allowed::<S>),
    )
    .with_state(state)
}

async fn method_not_allowed<S>(State(state): State<ApiState<S>>) -> ApiError {
  state.reject(Error::MethodNotAllowed)
}

// ─── Integration tests ────────────────────────────────────────────────────────
