//! The `PostStore` trait.
//!
//! Implemented by storage backends (e.g. `campus-store-sqlite`). The API layer
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::model::{NewPost, Post, School, User};

/// Abstraction over the persistence layer.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PostStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Read-only references ──────────────────────────────────────────────

  /// Retrieve a user by id. Returns `None` if not found.
  fn get_user(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Retrieve a school by id. Returns `None` if not found.
  fn get_school(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<School>, Self::Error>> + Send + '_;

  // ── Posts ─────────────────────────────────────────────────────────────

  /// Persist a new post and return it. The store assigns `post_id` and
  /// `created_at`.
  fn create_post(
    &self,
    input: NewPost,
  ) -> impl Future<Output = Result<Post, Self::Error>> + Send + '_;

  /// Every post, in ascending id order.
  fn list_posts(
    &self,
  ) -> impl Future<Output = Result<Vec<Post>, Self::Error>> + Send + '_;

  /// Retrieve a post by id, with its comments. Returns `None` if not found.
  fn get_post(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Post>, Self::Error>> + Send + '_;

  /// Hard-delete a post and its comments. Returns `false` if the post did not
  /// exist.
  fn delete_post(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
