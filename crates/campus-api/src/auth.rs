//! Bearer-token extractor and standalone verifier.
//!
//! Tokens are issued elsewhere. This module only checks the signature and
//! expiry, reads the `sub` claim, and resolves it to a [`User`].

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use campus_core::{Error, model::User, store::PostStore};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

/// Verification settings for bearer tokens.
#[derive(Clone)]
pub struct AuthConfig {
  /// HMAC secret shared with the token issuer.
  pub jwt_secret: String,
}

/// The user resolved from the request's bearer token.
#[derive(Debug, Clone)]
pub struct Caller(pub User);

/// Issuers differ on whether `sub` is a number or a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SubjectClaim {
  Id(i64),
  Text(String),
}

#[derive(Debug, Deserialize)]
struct Claims {
  sub: SubjectClaim,
}

/// Verify the bearer token in `headers` and return its subject as a user id.
///
/// `Ok(None)` means the token is valid but its subject cannot name a user.
pub fn subject_from_headers(
  headers: &HeaderMap,
  config: &AuthConfig,
) -> Result<Option<i64>, Error> {
  let token = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .ok_or(Error::Unauthenticated)?;

  let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
  let data =
    jsonwebtoken::decode::<Claims>(token, &key, &Validation::new(Algorithm::HS256))
      .map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        Error::Unauthenticated
      })?;

  Ok(match data.claims.sub {
    SubjectClaim::Id(id) => Some(id),
    SubjectClaim::Text(s) => s.trim().parse().ok(),
  })
}

impl<S> FromRequestParts<ApiState<S>> for Caller
where
  S: PostStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &ApiState<S>,
  ) -> Result<Self, Self::Rejection> {
    let subject = subject_from_headers(&parts.headers, &state.auth)
      .map_err(|e| state.reject(e))?;

    let user = match subject {
      Some(id) => state
        .store
        .get_user(id)
        .await
        .map_err(|e| ApiError::Store(Box::new(e)))?,
      None => None,
    };

    user.map(Caller).ok_or_else(|| state.reject(Error::UserNotFound))
  }
}
