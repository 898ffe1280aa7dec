//! Human-readable response messages, keyed by [`Message`] and selected by
//! [`Locale`].
//!
//! The API used to be served from two surfaces that differed only in the
//! language of their messages. Both are now one handler set parameterised by
//! a locale.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Language of the `message` field in JSON responses.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Locale {
  #[default]
  En,
  Fr,
}

/// Every message the API can put in a `{"message": ...}` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Message {
  Unauthenticated,
  UserNotFound,
  EmptyPayload,
  MissingFields,
  SchoolNotFound,
  SchoolMismatch,
  PostNotFound,
  PostDeleted,
  MethodNotAllowed,
}

impl Locale {
  /// Look up the text for `message` in this locale.
  pub fn text(self, message: Message) -> &'static str {
    match self {
      Self::En => english(message),
      Self::Fr => french(message),
    }
  }
}

fn english(message: Message) -> &'static str {
  match message {
    Message::Unauthenticated => "Authentication required.",
    Message::UserNotFound => "User not found.",
    Message::EmptyPayload => "No data provided.",
    Message::MissingFields => {
      "Some data is missing. Please refer to the documentation."
    }
    Message::SchoolNotFound => "School not found.",
    Message::SchoolMismatch => "User and post schools do not match.",
    Message::PostNotFound => "Post not found.",
    Message::PostDeleted => "Post deleted.",
    Message::MethodNotAllowed => "Method not allowed.",
  }
}

fn french(message: Message) -> &'static str {
  match message {
    Message::Unauthenticated => "Authentification requise.",
    Message::UserNotFound => "Utilisateur introuvable.",
    Message::EmptyPayload => "Aucune donnée envoyée.",
    Message::MissingFields => {
      "De la donnée est manquante. Consultez la documentation."
    }
    Message::SchoolNotFound => "École introuvable.",
    Message::SchoolMismatch => {
      "L'école donnée n'est pas celle liée à l'utilisateur."
    }
    Message::PostNotFound => "Post introuvable.",
    Message::PostDeleted => "Post supprimé.",
    Message::MethodNotAllowed => "Methode non autorisée.",
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn every_message_has_text_in_every_locale() {
    for locale in Locale::iter() {
      for message in Message::iter() {
        assert!(!locale.text(message).is_empty(), "{locale}/{message}");
      }
    }
  }

  #[test]
  fn locales_differ() {
    for message in Message::iter() {
      assert_ne!(Locale::En.text(message), Locale::Fr.text(message));
    }
  }

  #[test]
  fn locale_parses_case_insensitively() {
    assert_eq!(Locale::from_str("fr").unwrap(), Locale::Fr);
    assert_eq!(Locale::from_str("EN").unwrap(), Locale::En);
    assert!(Locale::from_str("de").is_err());
  }

  #[test]
  fn locale_deserializes_from_lowercase() {
    let l: Locale = serde_json::from_str("\"fr\"").unwrap();
    assert_eq!(l, Locale::Fr);
    assert_eq!(Locale::default(), Locale::En);
  }
}
