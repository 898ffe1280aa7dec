//! Validation of a post-creation payload.
//!
//! Validation is all-or-nothing and stops at the first failure. Reference
//! resolution (looking the school up) and the ownership check live here as
//! well, but the lookup itself is the caller's job since it needs a store.

use serde_json::{Map, Value};

use crate::{
  Error, Result,
  model::{NewPost, School, User},
};

/// The `school` field of a payload, as far as it can be interpreted without
/// a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchoolRef {
  Id(i64),
  /// Present but not an id; a lookup can never succeed.
  Unresolvable,
}

/// A payload that passed every store-independent check.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
  pub content:   String,
  pub school:    Option<SchoolRef>,
  pub locations: Option<Value>,
}

impl Submission {
  /// Parse and validate a raw request body.
  pub fn parse(raw: &[u8]) -> Result<Self> {
    let value: Value =
      serde_json::from_slice(raw).map_err(|_| Error::EmptyPayload)?;
    Self::from_value(value)
  }

  pub fn from_value(value: Value) -> Result<Self> {
    if is_blank(&value) {
      return Err(Error::EmptyPayload);
    }
    let Value::Object(mut fields) = value else {
      return Err(Error::MissingFields);
    };

    // Keys must be set (present, not null) before values are looked at.
    if !is_set(&fields, "content")
      || (!is_set(&fields, "school") && !is_set(&fields, "locations"))
    {
      return Err(Error::MissingFields);
    }

    let content = match fields.remove("content") {
      Some(Value::String(s)) if !s.is_empty() => s,
      _ => return Err(Error::MissingFields),
    };
    let school = fields.remove("school").filter(|v| !is_blank(v));
    let locations = fields.remove("locations").filter(|v| !is_blank(v));

    if school.is_none() && locations.is_none() {
      return Err(Error::MissingFields);
    }

    Ok(Self {
      content,
      school: school.as_ref().map(school_ref),
      locations,
    })
  }

  /// Build the store input once the school (if any) has been resolved and
  /// authorised.
  pub fn into_new_post(self, school: Option<School>, owner: &User) -> NewPost {
    NewPost {
      content: self.content,
      school,
      locations: self.locations,
      user_id: owner.user_id,
    }
  }
}

/// A user may only post to their own school.
pub fn authorize_school(caller: &User, school: &School) -> Result<()> {
  if caller.school_id == Some(school.school_id) {
    Ok(())
  } else {
    Err(Error::SchoolMismatch)
  }
}

fn is_set(fields: &Map<String, Value>, key: &str) -> bool {
  fields.get(key).is_some_and(|v| !v.is_null())
}

/// Values treated as "nothing was sent": null, false, zero, the empty string,
/// and empty arrays or objects.
fn is_blank(value: &Value) -> bool {
  match value {
    Value::Null => true,
    Value::Bool(b) => !b,
    Value::Number(n) => n.as_f64() == Some(0.0),
    Value::String(s) => s.is_empty(),
    Value::Array(a) => a.is_empty(),
    Value::Object(o) => o.is_empty(),
  }
}

fn school_ref(value: &Value) -> SchoolRef {
  let id = match value {
    Value::Number(n) => n.as_i64(),
    Value::String(s) => s.trim().parse().ok(),
    _ => None,
  };
  id.map_or(SchoolRef::Unresolvable, SchoolRef::Id)
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use serde_json::json;

  use super::*;

  fn check(v: Value) -> Result<Submission> { Submission::from_value(v) }

  fn user(school_id: Option<i64>) -> User {
    User {
      user_id: 1,
      school_id,
      created_at: Utc::now(),
    }
  }

  // ── Empty payloads ──────────────────────────────────────────────────────

  #[test]
  fn unparseable_body_is_empty_payload() {
    assert_eq!(Submission::parse(b""), Err(Error::EmptyPayload));
    assert_eq!(Submission::parse(b"{not json"), Err(Error::EmptyPayload));
  }

  #[test]
  fn empty_values_are_empty_payload() {
    for v in [json!(null), json!({}), json!([]), json!(""), json!(0)] {
      assert_eq!(check(v.clone()), Err(Error::EmptyPayload), "{v}");
    }
  }

  #[test]
  fn non_object_is_missing_fields() {
    assert_eq!(check(json!([1, 2])), Err(Error::MissingFields));
    assert_eq!(check(json!("hello")), Err(Error::MissingFields));
  }

  // ── Missing fields ──────────────────────────────────────────────────────

  #[test]
  fn missing_content() {
    assert_eq!(check(json!({ "school": 1 })), Err(Error::MissingFields));
    assert_eq!(
      check(json!({ "content": null, "locations": ["park"] })),
      Err(Error::MissingFields)
    );
  }

  #[test]
  fn content_without_school_or_locations() {
    assert_eq!(check(json!({ "content": "hi" })), Err(Error::MissingFields));
    assert_eq!(
      check(json!({ "content": "hi", "school": null, "locations": null })),
      Err(Error::MissingFields)
    );
  }

  #[test]
  fn blank_values_count_as_missing() {
    assert_eq!(
      check(json!({ "content": "", "school": 3 })),
      Err(Error::MissingFields)
    );
    assert_eq!(
      check(json!({ "content": "hi", "school": 0, "locations": [] })),
      Err(Error::MissingFields)
    );
  }

  #[test]
  fn non_string_content_is_rejected() {
    assert_eq!(
      check(json!({ "content": 42, "school": 3 })),
      Err(Error::MissingFields)
    );
  }

  // ── Accepted payloads ───────────────────────────────────────────────────

  #[test]
  fn locations_only() {
    let s = check(json!({ "content": "hello", "locations": ["park"] })).unwrap();
    assert_eq!(s.content, "hello");
    assert_eq!(s.school, None);
    assert_eq!(s.locations, Some(json!(["park"])));
  }

  #[test]
  fn school_only_accepts_numeric_strings() {
    let s = check(json!({ "content": "hi", "school": 5 })).unwrap();
    assert_eq!(s.school, Some(SchoolRef::Id(5)));
    let s = check(json!({ "content": "hi", "school": "5" })).unwrap();
    assert_eq!(s.school, Some(SchoolRef::Id(5)));
  }

  #[test]
  fn blank_locations_are_dropped_when_school_is_given() {
    let s = check(json!({ "content": "hi", "school": 5, "locations": [] }))
      .unwrap();
    assert_eq!(s.locations, None);
  }

  #[test]
  fn odd_school_value_is_unresolvable() {
    let s = check(json!({ "content": "hi", "school": { "id": 5 } })).unwrap();
    assert_eq!(s.school, Some(SchoolRef::Unresolvable));
  }

  #[test]
  fn locations_pass_through_verbatim() {
    let locs = json!([{ "lat": 48.85, "lng": 2.35 }, "library"]);
    let s = check(json!({ "content": "hi", "locations": locs.clone() })).unwrap();
    assert_eq!(s.locations, Some(locs));
  }

  // ── Authorisation ───────────────────────────────────────────────────────

  #[test]
  fn school_must_match_caller() {
    let school = School {
      school_id: 5,
      name:      "North".into(),
    };
    assert!(authorize_school(&user(Some(5)), &school).is_ok());
    assert_eq!(
      authorize_school(&user(Some(7)), &school),
      Err(Error::SchoolMismatch)
    );
    assert_eq!(
      authorize_school(&user(None), &school),
      Err(Error::SchoolMismatch)
    );
  }

  #[test]
  fn new_post_is_owned_by_caller() {
    let s = check(json!({ "content": "hi", "locations": ["gym"] })).unwrap();
    let post = s.into_new_post(None, &user(None));
    assert_eq!(post.user_id, 1);
    assert_eq!(post.content, "hi");
    assert_eq!(post.locations, Some(json!(["gym"])));
  }
}
