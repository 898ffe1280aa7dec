//! [`SqliteStore`] — the SQLite implementation of [`PostStore`].

use std::{collections::HashMap, path::Path};

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use campus_core::{
  model::{Comment, NewPost, Post, School, User},
  store::PostStore,
};

use crate::{
  Error, Result,
  encode::{
    COMMENT_COLUMNS, POST_COLUMNS, RawComment, RawPost, RawUser, encode_dt,
    encode_locations,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A campus store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Load posts matching `filter` (an SQL fragment over alias `p`) together
  /// with their comments, in one round trip.
  async fn load_posts(
    &self,
    filter: &'static str,
    params: Vec<i64>,
  ) -> Result<Vec<Post>> {
    let (raw_posts, raw_comments): (Vec<RawPost>, Vec<RawComment>) = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {POST_COLUMNS}
           FROM posts p
           LEFT JOIN schools s ON s.school_id = p.school_id
           {filter}
           ORDER BY p.post_id"
        );
        let posts = conn
          .prepare(&sql)?
          .query_map(rusqlite::params_from_iter(&params), RawPost::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let sql = format!(
          "SELECT {COMMENT_COLUMNS}
           FROM comments
           WHERE post_id IN (SELECT p.post_id FROM posts p {filter})
           ORDER BY comment_id"
        );
        let comments = conn
          .prepare(&sql)?
          .query_map(rusqlite::params_from_iter(&params), RawComment::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((posts, comments))
      })
      .await?;

    let mut by_post: HashMap<i64, Vec<Comment>> = HashMap::new();
    for raw in raw_comments {
      let comment = raw.into_comment()?;
      by_post.entry(comment.post_id).or_default().push(comment);
    }

    raw_posts
      .into_iter()
      .map(|raw| {
        let comments = by_post.remove(&raw.post_id).unwrap_or_default();
        raw.into_post(comments)
      })
      .collect()
  }

  // ── Seeding ───────────────────────────────────────────────────────────────
  //
  // Schools, users and comments are owned by other services. These helpers
  // exist for fixtures and local development.

  /// Insert a school.
  pub async fn add_school(&self, name: impl Into<String>) -> Result<School> {
    let name = name.into();
    let insert_name = name.clone();
    let school_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO schools (name) VALUES (?1)",
          rusqlite::params![insert_name],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(School { school_id, name })
  }

  /// Insert a user, optionally attached to a school.
  pub async fn add_user(&self, school_id: Option<i64>) -> Result<User> {
    if let Some(id) = school_id
      && self.get_school(id).await?.is_none()
    {
      return Err(Error::MissingReference { table: "school", id });
    }

    let created_at = Utc::now();
    let at_str = encode_dt(created_at);
    let user_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (school_id, created_at) VALUES (?1, ?2)",
          rusqlite::params![school_id, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(User { user_id, school_id, created_at })
  }

  /// Insert a comment on an existing post.
  pub async fn add_comment(
    &self,
    post_id: i64,
    user_id: i64,
    content: impl Into<String>,
  ) -> Result<Comment> {
    if self.get_post(post_id).await?.is_none() {
      return Err(Error::MissingReference { table: "post", id: post_id });
    }

    let content = content.into();
    let created_at = Utc::now();
    let insert_content = content.clone();
    let at_str = encode_dt(created_at);
    let comment_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO comments (post_id, user_id, content, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![post_id, user_id, insert_content, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(Comment { comment_id, post_id, user_id, content, created_at })
  }
}

// ─── PostStore impl ──────────────────────────────────────────────────────────

impl PostStore for SqliteStore {
  type Error = Error;

  // ── Read-only references ──────────────────────────────────────────────────

  async fn get_user(&self, id: i64) -> Result<Option<User>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT user_id, school_id, created_at FROM users WHERE user_id = ?1",
            rusqlite::params![id],
            |row| {
              Ok(RawUser {
                user_id:    row.get(0)?,
                school_id:  row.get(1)?,
                created_at: row.get(2)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn get_school(&self, id: i64) -> Result<Option<School>> {
    let school = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT school_id, name FROM schools WHERE school_id = ?1",
            rusqlite::params![id],
            |row| {
              Ok(School {
                school_id: row.get(0)?,
                name:      row.get(1)?,
              })
            },
          )
          .optional()?)
      })
      .await?;
    Ok(school)
  }

  // ── Posts ─────────────────────────────────────────────────────────────────

  async fn create_post(&self, input: NewPost) -> Result<Post> {
    let created_at    = Utc::now();
    let at_str        = encode_dt(created_at);
    let content       = input.content.clone();
    let school_id     = input.school.as_ref().map(|s| s.school_id);
    let locations_str = input
      .locations
      .as_ref()
      .map(encode_locations)
      .transpose()?;
    let user_id       = input.user_id;

    let post_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO posts (content, school_id, locations, user_id, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![content, school_id, locations_str, user_id, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(post_id, user_id, "inserted post");

    Ok(Post {
      post_id,
      content: input.content,
      school: input.school,
      locations: input.locations,
      user_id,
      created_at,
      comments: Vec::new(),
    })
  }

  async fn list_posts(&self) -> Result<Vec<Post>> {
    self.load_posts("", Vec::new()).await
  }

  async fn get_post(&self, id: i64) -> Result<Option<Post>> {
    let mut posts = self.load_posts("WHERE p.post_id = ?1", vec![id]).await?;
    Ok(posts.pop())
  }

  async fn delete_post(&self, id: i64) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM posts WHERE post_id = ?1",
          rusqlite::params![id],
        )?;
        Ok(n > 0)
      })
      .await?;
    Ok(deleted)
  }
}
