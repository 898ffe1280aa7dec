//! Integration tests for `SqliteStore` against an in-memory database.

use campus_core::{model::NewPost, store::PostStore};
use serde_json::json;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn located_post(user_id: i64, content: &str) -> NewPost {
  NewPost {
    content: content.into(),
    school: None,
    locations: Some(json!(["park"])),
    user_id,
  }
}

// ─── References ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_user() {
  let s = store().await;
  let school = s.add_school("Lycée Hoche").await.unwrap();
  let user = s.add_user(Some(school.school_id)).await.unwrap();

  let fetched = s.get_user(user.user_id).await.unwrap().unwrap();
  assert_eq!(fetched, user);
  assert_eq!(fetched.school_id, Some(school.school_id));
}

#[tokio::test]
async fn missing_user_and_school_return_none() {
  let s = store().await;
  assert!(s.get_user(99999).await.unwrap().is_none());
  assert!(s.get_school(99999).await.unwrap().is_none());
}

#[tokio::test]
async fn add_user_with_unknown_school_is_rejected() {
  let s = store().await;
  let err = s.add_user(Some(42)).await.unwrap_err();
  assert!(matches!(err, Error::MissingReference { table: "school", id: 42 }));
}

#[tokio::test]
async fn get_school_by_id() {
  let s = store().await;
  let a = s.add_school("North").await.unwrap();
  let b = s.add_school("South").await.unwrap();
  assert_ne!(a.school_id, b.school_id);
  assert_eq!(s.get_school(b.school_id).await.unwrap(), Some(b));
}

// ─── Posts ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_post_with_locations() {
  let s = store().await;
  let user = s.add_user(None).await.unwrap();

  let post = s.create_post(located_post(user.user_id, "hello")).await.unwrap();
  assert_eq!(post.content, "hello");
  assert!(post.school.is_none());
  assert!(post.comments.is_empty());

  let fetched = s.get_post(post.post_id).await.unwrap().unwrap();
  assert_eq!(fetched, post);
  assert_eq!(fetched.locations, Some(json!(["park"])));
}

#[tokio::test]
async fn create_post_with_school_resolves_school_on_read() {
  let s = store().await;
  let school = s.add_school("North").await.unwrap();
  let user = s.add_user(Some(school.school_id)).await.unwrap();

  let post = s
    .create_post(NewPost {
      content:   "school news".into(),
      school:    Some(school.clone()),
      locations: None,
      user_id:   user.user_id,
    })
    .await
    .unwrap();

  let fetched = s.get_post(post.post_id).await.unwrap().unwrap();
  assert_eq!(fetched.school, Some(school));
  assert_eq!(fetched.locations, None);
  assert_eq!(fetched.user_id, user.user_id);
}

#[tokio::test]
async fn post_without_school_or_locations_violates_schema() {
  let s = store().await;
  let user = s.add_user(None).await.unwrap();

  let result = s
    .create_post(NewPost {
      content:   "orphan".into(),
      school:    None,
      locations: None,
      user_id:   user.user_id,
    })
    .await;
  assert!(matches!(result, Err(Error::Database(_))));
  assert!(s.list_posts().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_posts_in_id_order() {
  let s = store().await;
  let user = s.add_user(None).await.unwrap();
  for content in ["one", "two", "three"] {
    s.create_post(located_post(user.user_id, content)).await.unwrap();
  }

  let posts = s.list_posts().await.unwrap();
  let contents: Vec<_> = posts.iter().map(|p| p.content.as_str()).collect();
  assert_eq!(contents, ["one", "two", "three"]);
  assert!(posts.windows(2).all(|w| w[0].post_id < w[1].post_id));
}

#[tokio::test]
async fn get_post_is_repeatable() {
  let s = store().await;
  let user = s.add_user(None).await.unwrap();
  let post = s.create_post(located_post(user.user_id, "same")).await.unwrap();

  let first = s.get_post(post.post_id).await.unwrap();
  let second = s.get_post(post.post_id).await.unwrap();
  assert_eq!(first, second);
}

#[tokio::test]
async fn delete_post_removes_it() {
  let s = store().await;
  let user = s.add_user(None).await.unwrap();
  let post = s.create_post(located_post(user.user_id, "bye")).await.unwrap();

  assert!(s.delete_post(post.post_id).await.unwrap());
  assert!(s.get_post(post.post_id).await.unwrap().is_none());
  assert!(!s.delete_post(post.post_id).await.unwrap());
}

// ─── Comments ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn comments_are_loaded_with_posts() {
  let s = store().await;
  let author = s.add_user(None).await.unwrap();
  let reader = s.add_user(None).await.unwrap();
  let post = s.create_post(located_post(author.user_id, "hi")).await.unwrap();
  let other = s.create_post(located_post(author.user_id, "yo")).await.unwrap();

  let c1 = s.add_comment(post.post_id, reader.user_id, "first").await.unwrap();
  let c2 = s.add_comment(post.post_id, author.user_id, "second").await.unwrap();

  let fetched = s.get_post(post.post_id).await.unwrap().unwrap();
  assert_eq!(fetched.comments, vec![c1, c2]);
  let untouched = s.get_post(other.post_id).await.unwrap().unwrap();
  assert!(untouched.comments.is_empty());

  let all = s.list_posts().await.unwrap();
  assert_eq!(all[0].comments.len(), 2);
  assert!(all[1].comments.is_empty());
}

#[tokio::test]
async fn deleting_post_cascades_to_comments() {
  let s = store().await;
  let user = s.add_user(None).await.unwrap();
  let post = s.create_post(located_post(user.user_id, "hi")).await.unwrap();
  s.add_comment(post.post_id, user.user_id, "soon gone").await.unwrap();

  assert!(s.delete_post(post.post_id).await.unwrap());

  let remaining: i64 = s
    .conn
    .call(|conn| {
      Ok(conn.query_row("SELECT COUNT(*) FROM comments", [], |r| r.get(0))?)
    })
    .await
    .unwrap();
  assert_eq!(remaining, 0);
}

#[tokio::test]
async fn comment_on_missing_post_is_rejected() {
  let s = store().await;
  let user = s.add_user(None).await.unwrap();
  let err = s.add_comment(7, user.user_id, "nope").await.unwrap_err();
  assert!(matches!(err, Error::MissingReference { table: "post", id: 7 }));
}
