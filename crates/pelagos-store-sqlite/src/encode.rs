//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Enums are stored as their
//! text discriminants. UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use pelagos_core::{
  identity::Role,
  resource::{ResourceCategory, ResourceRecord},
  store::ProfileRow,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Raw rows ─────────────────────────────────────────────────────────────────

/// An `accounts` row exactly as read from SQLite, before decoding.
pub struct RawAccount {
  pub user_id:      String,
  pub email:        String,
  pub display_name: String,
  pub avatar_url:   Option<String>,
  pub role:         String,
  pub is_banned:    bool,
  pub created_at:   String,
}

impl RawAccount {
  pub fn into_profile_row(self) -> Result<ProfileRow> {
    Ok(ProfileRow {
      id:           decode_uuid(&self.user_id)?,
      email:        self.email,
      display_name: self.display_name,
      role:         Role::parse(&self.role).map_err(Error::Core)?,
      avatar_url:   self.avatar_url,
      created_at:   decode_dt(&self.created_at)?,
      is_banned:    self.is_banned,
    })
  }
}

/// A `resources` row exactly as read from SQLite, before decoding.
pub struct RawResource {
  pub id:        String,
  pub title:     String,
  pub category:  String,
  pub excerpt:   String,
  pub author:    String,
  pub image_url: String,
  pub read_time: String,
  pub published: String,
  pub featured:  bool,
}

impl RawResource {
  pub fn into_record(self) -> Result<ResourceRecord> {
    Ok(ResourceRecord {
      id:        self.id,
      title:     self.title,
      category:  ResourceCategory::parse(&self.category).map_err(Error::Core)?,
      excerpt:   self.excerpt,
      author:    self.author,
      image_url: self.image_url,
      read_time: self.read_time,
      date:      self.published,
      featured:  self.featured,
    })
  }
}
