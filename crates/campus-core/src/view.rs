//! Response projections.
//!
//! A projection is the field set a response exposes for an entity, chosen
//! independently of how the entity is stored. [`PostView`] is the "post" view
//! used by every post endpoint; [`CommentView`] is the "comments" view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Comment, Post, School};

/// Reference to another entity by id only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ref {
  pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolView {
  pub id:   i64,
  pub name: String,
}

impl From<School> for SchoolView {
  fn from(s: School) -> Self {
    Self {
      id:   s.school_id,
      name: s.name,
    }
  }
}

/// The "post" view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
  pub id:         i64,
  pub content:    String,
  pub school:     Option<SchoolView>,
  pub locations:  Option<serde_json::Value>,
  pub user:       Ref,
  pub created_at: DateTime<Utc>,
  pub comments:   Vec<Ref>,
}

impl From<Post> for PostView {
  fn from(p: Post) -> Self {
    Self {
      id:         p.post_id,
      content:    p.content,
      school:     p.school.map(SchoolView::from),
      locations:  p.locations,
      user:       Ref { id: p.user_id },
      created_at: p.created_at,
      comments:   p
        .comments
        .iter()
        .map(|c| Ref { id: c.comment_id })
        .collect(),
    }
  }
}

/// The "comments" view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
  pub id:         i64,
  pub content:    String,
  pub user:       Ref,
  pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentView {
  fn from(c: Comment) -> Self {
    Self {
      id:         c.comment_id,
      content:    c.content,
      user:       Ref { id: c.user_id },
      created_at: c.created_at,
    }
  }
}

/// Plain acknowledgement body, e.g. after a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
  pub message: String,
}
