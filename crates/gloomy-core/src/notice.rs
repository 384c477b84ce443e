//! Notices generated as a side effect of new content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

use crate::{
  Error, Result,
  entity::{Entity, EntityKind},
};

/// What kind of content triggered a notice.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticeKind {
  Comment,
  Reply,
}

impl NoticeKind {
  /// The code stored in the `kind` column.
  pub fn as_str(self) -> &'static str { self.into() }

  pub fn from_code(code: &str) -> Result<Self> {
    code
      .parse()
      .map_err(|_| Error::UnknownNoticeKind(code.to_owned()))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
  pub id:           i64,
  pub feed_id:      i64,
  /// The feed author, when registered. Anonymous feeds have nobody to notify
  /// but the notice is still recorded.
  pub recipient_id: Option<i64>,
  pub kind:         NoticeKind,
  /// Id of the comment or reply that triggered the notice.
  pub source_id:    i64,
  pub is_read:      bool,
  pub created_at:   DateTime<Utc>,
}

impl Entity for Notice {
  const KIND: EntityKind = EntityKind::Notice;

  fn id(&self) -> i64 { self.id }
}

/// Input to [`crate::store::Repository::insert_notice`].
#[derive(Debug, Clone)]
pub struct NewNotice {
  pub feed_id:      i64,
  pub recipient_id: Option<i64>,
  pub kind:         NoticeKind,
  pub source_id:    i64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kind_codes_match_serde() {
    assert_eq!(NoticeKind::Reply.as_str(), "REPLY");
    assert_eq!(NoticeKind::from_code("COMMENT").unwrap(), NoticeKind::Comment);
    assert_eq!(
      serde_json::to_string(&NoticeKind::Comment).unwrap(),
      "\"COMMENT\""
    );
    assert!(matches!(
      NoticeKind::from_code("LIKE"),
      Err(Error::UnknownNoticeKind(_))
    ));
  }
}
