//! Feeds, the top-level posts ("confessions") everything else hangs off.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::{
  Error,
  author::Author,
  entity::{Entity, EntityKind},
  lifecycle::Lifecycle,
};

// ─── Category ────────────────────────────────────────────────────────────────

/// The board a feed is posted to. Codes are matched case-insensitively.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
#[serde(try_from = "String", into = "&'static str")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Category {
  All,
  Chat,
  Family,
  Friend,
}

impl Category {
  /// The code stored in the `category` column, e.g. `"CHAT"`.
  pub fn code(self) -> &'static str { self.into() }

  /// Human-readable board title.
  pub fn title(self) -> &'static str {
    match self {
      Self::All => "모든 고민",
      Self::Chat => "잡담",
      Self::Family => "가족",
      Self::Friend => "친구",
    }
  }
}

impl TryFrom<String> for Category {
  type Error = Error;

  fn try_from(s: String) -> Result<Self, Self::Error> {
    s.parse().map_err(|_| Error::UnknownCategory(s))
  }
}

// ─── Feed ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
  pub id:         i64,
  pub content:    String,
  pub category:   Category,
  pub author:     Author,
  pub lifecycle:  Lifecycle,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Entity for Feed {
  const KIND: EntityKind = EntityKind::Feed;

  fn id(&self) -> i64 { self.id }
}

/// Input to [`crate::store::Repository::insert_feed`].
#[derive(Debug, Clone)]
pub struct NewFeed {
  pub content:  String,
  pub category: Category,
  pub author:   Author,
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn category_parses_case_insensitively() {
    assert_eq!("chat".parse::<Category>().unwrap(), Category::Chat);
    assert_eq!("Family".parse::<Category>().unwrap(), Category::Family);
    assert_eq!("FRIEND".parse::<Category>().unwrap(), Category::Friend);
    assert!(Category::try_from("work".to_owned()).is_err());
  }

  #[test]
  fn category_serde_uses_code() {
    let json = serde_json::to_string(&Category::All).unwrap();
    assert_eq!(json, "\"ALL\"");
    let back: Category = serde_json::from_str("\"chat\"").unwrap();
    assert_eq!(back, Category::Chat);
  }

  #[test]
  fn every_category_has_a_title() {
    for c in Category::iter() {
      assert!(!c.title().is_empty());
      assert_eq!(c.code().parse::<Category>().unwrap(), c);
    }
  }
}
