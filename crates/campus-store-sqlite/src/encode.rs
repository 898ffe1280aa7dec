//! Encoding and decoding helpers between domain types and the plain values
//! stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Locations are stored as the
//! compact JSON text of whatever the client sent.

use chrono::{DateTime, Utc};
use campus_core::model::{Comment, Post, School, User};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Locations ───────────────────────────────────────────────────────────────

pub fn encode_locations(v: &serde_json::Value) -> Result<String> {
  Ok(serde_json::to_string(v)?)
}

pub fn decode_locations(s: &str) -> Result<serde_json::Value> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawPost::from_row`].
pub const POST_COLUMNS: &str = "p.post_id, p.content, p.school_id, s.name, \
                                p.locations, p.user_id, p.created_at";

/// Column list matching [`RawComment::from_row`].
pub const COMMENT_COLUMNS: &str =
  "comment_id, post_id, user_id, content, created_at";

/// Raw values from a `posts` row left-joined with `schools`.
pub struct RawPost {
  pub post_id:     i64,
  pub content:     String,
  pub school_id:   Option<i64>,
  pub school_name: Option<String>,
  pub locations:   Option<String>,
  pub user_id:     i64,
  pub created_at:  String,
}

impl RawPost {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      post_id:     row.get(0)?,
      content:     row.get(1)?,
      school_id:   row.get(2)?,
      school_name: row.get(3)?,
      locations:   row.get(4)?,
      user_id:     row.get(5)?,
      created_at:  row.get(6)?,
    })
  }

  pub fn into_post(self, comments: Vec<Comment>) -> Result<Post> {
    let school = match (self.school_id, self.school_name) {
      (Some(school_id), Some(name)) => Some(School { school_id, name }),
      _ => None,
    };
    let locations = self
      .locations
      .as_deref()
      .map(decode_locations)
      .transpose()?;

    Ok(Post {
      post_id: self.post_id,
      content: self.content,
      school,
      locations,
      user_id: self.user_id,
      created_at: decode_dt(&self.created_at)?,
      comments,
    })
  }
}

/// Raw values from a `comments` row.
pub struct RawComment {
  pub comment_id: i64,
  pub post_id:    i64,
  pub user_id:    i64,
  pub content:    String,
  pub created_at: String,
}

impl RawComment {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      comment_id: row.get(0)?,
      post_id:    row.get(1)?,
      user_id:    row.get(2)?,
      content:    row.get(3)?,
      created_at: row.get(4)?,
    })
  }

  pub fn into_comment(self) -> Result<Comment> {
    Ok(Comment {
      comment_id: self.comment_id,
      post_id:    self.post_id,
      user_id:    self.user_id,
      content:    self.content,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values from a `users` row.
pub struct RawUser {
  pub user_id:    i64,
  pub school_id:  Option<i64>,
  pub created_at: String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:    self.user_id,
      school_id:  self.school_id,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
