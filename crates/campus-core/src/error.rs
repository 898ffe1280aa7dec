//! Error types for `campus-core`.
//!
//! Every variant is a terminal, client-visible rejection. Storage failures are
//! not represented here; they belong to the backend's own error type.

use thiserror::Error;

use crate::messages::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
  #[error("missing or invalid bearer token")]
  Unauthenticated,

  #[error("token subject does not resolve to a user")]
  UserNotFound,

  #[error("request body is empty or not JSON")]
  EmptyPayload,

  #[error("required fields are missing")]
  MissingFields,

  #[error("referenced school does not exist")]
  SchoolNotFound,

  #[error("post school differs from the caller's school")]
  SchoolMismatch,

  #[error("post not found")]
  PostNotFound,

  #[error("method not allowed")]
  MethodNotAllowed,
}

impl Error {
  /// HTTP status code carried by this rejection.
  pub fn status(self) -> u16 {
    match self {
      Self::Unauthenticated => 401,
      Self::EmptyPayload | Self::MissingFields | Self::SchoolMismatch => 400,
      Self::UserNotFound | Self::SchoolNotFound | Self::PostNotFound => 404,
      Self::MethodNotAllowed => 405,
    }
  }

  /// Key into the locale message table.
  pub fn message(self) -> Message {
    match self {
      Self::Unauthenticated => Message::Unauthenticated,
      Self::UserNotFound => Message::UserNotFound,
      Self::EmptyPayload => Message::EmptyPayload,
      Self::MissingFields => Message::MissingFields,
      Self::SchoolNotFound => Message::SchoolNotFound,
      Self::SchoolMismatch => Message::SchoolMismatch,
      Self::PostNotFound => Message::PostNotFound,
      Self::MethodNotAllowed => Message::MethodNotAllowed,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
