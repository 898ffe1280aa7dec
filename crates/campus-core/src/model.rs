//! Entity types: users, schools, posts and comments.
//!
//! Users, schools and comments are owned by other parts of the system; this
//! service only reads them. Posts are created here, hard-deleted here, and
//! never updated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Users ───────────────────────────────────────────────────────────────────

/// An account, resolved from the subject of a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub user_id:    i64,
  /// The school the user belongs to, if any. A user without a school may
  /// only post with locations.
  pub school_id:  Option<i64>,
  pub created_at: DateTime<Utc>,
}

// ─── Schools ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
  pub school_id: i64,
  pub name:      String,
}

// ─── Comments ────────────────────────────────────────────────────────────────

/// A comment on a post. There is no write path for comments in this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
  pub comment_id: i64,
  pub post_id:    i64,
  pub user_id:    i64,
  pub content:    String,
  pub created_at: DateTime<Utc>,
}

// ─── Posts ───────────────────────────────────────────────────────────────────

/// A persisted post with its school resolved and its comments loaded.
///
/// Invariant: `school.is_some() || locations.is_some()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
  pub post_id:    i64,
  pub content:    String,
  pub school:     Option<School>,
  /// Opaque location descriptors, stored exactly as submitted.
  pub locations:  Option<serde_json::Value>,
  /// The owning user.
  pub user_id:    i64,
  /// Server-assigned timestamp.
  pub created_at: DateTime<Utc>,
  pub comments:   Vec<Comment>,
}

/// Input to [`crate::store::PostStore::create_post`].
/// `post_id` and `created_at` are always set by the store.
#[derive(Debug, Clone)]
pub struct NewPost {
  pub content:   String,
  pub school:    Option<School>,
  pub locations: Option<serde_json::Value>,
  pub user_id:   i64,
}
