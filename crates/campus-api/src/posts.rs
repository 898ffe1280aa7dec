//! Handlers for `/posts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/posts` | Every post, "post" view |
//! | `POST`   | `/posts` | Bearer token required; body `{content, school?, locations?}` |
//! | `GET`    | `/posts/:id` | 404 if not found |
//! | `DELETE` | `/posts/:id` | Hard delete; 404 if not found |
//! | `GET`    | `/posts/:id/comments` | "comments" view; 404 if the post is not found |

use axum::{
  Json,
  extract::{Path, State},
};
use bytes::Bytes;
use campus_core::{
  Error, Message,
  model::Post,
  store::PostStore,
  submission::{SchoolRef, Submission, authorize_school},
  view::{Ack, CommentView, PostView},
};

use crate::{ApiState, auth::Caller, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /posts`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<PostView>>, ApiError>
where
  S: PostStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let posts = state
    .store
    .list_posts()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(posts.into_iter().map(PostView::from).collect()))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /posts` — validates the body, checks the school against the
/// caller's, and returns the stored post.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Caller(caller): Caller,
  body: Bytes,
) -> Result<Json<PostView>, ApiError>
where
  S: PostStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let submission = Submission::parse(&body).map_err(|e| state.reject(e))?;

  let school = match submission.school {
    None => None,
    Some(SchoolRef::Unresolvable) => {
      return Err(state.reject(Error::SchoolNotFound));
    }
    Some(SchoolRef::Id(id)) => {
      let school = state
        .store
        .get_school(id)
        .await
        .map_err(|e| ApiError::Store(Box::new(e)))?
        .ok_or_else(|| state.reject(Error::SchoolNotFound))?;
      authorize_school(&caller, &school).map_err(|e| state.reject(e))?;
      Some(school)
    }
  };

  let post = state
    .store
    .create_post(submission.into_new_post(school, &caller))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(post_id = post.post_id, user_id = caller.user_id, "post created");
  Ok(Json(PostView::from(post)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /posts/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<Json<PostView>, ApiError>
where
  S: PostStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let post = find(&state, &id).await?;
  Ok(Json(PostView::from(post)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /posts/:id` — any caller may delete any post.
pub async fn delete_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Ack>, ApiError>
where
  S: PostStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let post_id = parse_id(&state, &id)?;
  let deleted = state
    .store
    .delete_post(post_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !deleted {
    return Err(state.reject(Error::PostNotFound));
  }

  tracing::info!(post_id, "post deleted");
  Ok(Json(Ack {
    message: state.locale.text(Message::PostDeleted).to_string(),
  }))
}

// ─── Comments ─────────────────────────────────────────────────────────────────

/// `GET /posts/:id/comments`
pub async fn comments<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Vec<CommentView>>, ApiError>
where
  S: PostStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let post = find(&state, &id).await?;
  Ok(Json(post.comments.into_iter().map(CommentView::from).collect()))
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// A path segment that is not an integer cannot name a post.
fn parse_id<S: PostStore>(state: &ApiState<S>, raw: &str) -> Result<i64, ApiError> {
  raw.parse().map_err(|_| state.reject(Error::PostNotFound))
}

async fn find<S>(state: &ApiState<S>, raw_id: &str) -> Result<Post, ApiError>
where
  S: PostStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let id = parse_id(state, raw_id)?;
  state
    .store
    .get_post(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| state.reject(Error::PostNotFound))
}
