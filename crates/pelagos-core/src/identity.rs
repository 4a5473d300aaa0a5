//! Identity — the authenticated user's profile record.
//!
//! Identity fields live entirely in the store's auth metadata; there is no
//! separate profile table to join (or to race against on registration).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// The role recorded in a user's auth metadata.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  #[default]
  User,
  Researcher,
  Admin,
}

impl Role {
  pub fn is_admin(self) -> bool { matches!(self, Self::Admin) }

  /// Text form used in storage columns.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::User => "user",
      Self::Researcher => "researcher",
      Self::Admin => "admin",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "user" => Ok(Self::User),
      "researcher" => Ok(Self::Researcher),
      "admin" => Ok(Self::Admin),
      other => Err(Error::UnknownRole(other.to_string())),
    }
  }
}

/// The authenticated user, assembled from the store's auth fields plus
/// user metadata. Replaced wholesale on every auth event — never patched
/// field-by-field from an event payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
  pub id:               Uuid,
  pub display_name:     String,
  pub email:            String,
  pub avatar_url:       Option<String>,
  pub role:             Role,
  pub join_date:        DateTime<Utc>,
  pub favorite_species: Vec<String>,
}

/// Input to account registration. The password is hashed by the store;
/// it is never persisted in the clear.
#[derive(Debug, Clone)]
pub struct NewAccount {
  pub display_name: String,
  pub email:        String,
  pub password:     String,
}

/// A partial update to identity metadata. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct IdentityPatch {
  pub display_name:     Option<String>,
  pub avatar_url:       Option<String>,
  pub role:             Option<Role>,
  pub favorite_species: Option<Vec<String>>,
}

impl IdentityPatch {
  pub fn is_empty(&self) -> bool {
    self.display_name.is_none()
      && self.avatar_url.is_none()
      && self.role.is_none()
      && self.favorite_species.is_none()
  }
}

impl Identity {
  /// Shallow-merge `patch` into this identity. Used for the optimistic
  /// local update after a successful metadata write.
  pub fn apply(&mut self, patch: &IdentityPatch) {
    if let Some(name) = &patch.display_name {
      self.display_name = name.clone();
    }
    if let Some(url) = &patch.avatar_url {
      self.avatar_url = Some(url.clone());
    }
    if let Some(role) = patch.role {
      self.role = role;
    }
    if let Some(favorites) = &patch.favorite_species {
      self.favorite_species = favorites.clone();
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn identity() -> Identity {
    Identity {
      id:               Uuid::new_v4(),
      display_name:     "Mara".to_string(),
      email:            "mara@example.com".to_string(),
      avatar_url:       None,
      role:             Role::User,
      join_date:        Utc::now(),
      favorite_species: vec!["blue-whale".to_string()],
    }
  }

  #[test]
  fn apply_merges_only_present_fields() {
    let mut id = identity();
    id.apply(&IdentityPatch {
      display_name: Some("Mara R.".to_string()),
      ..IdentityPatch::default()
    });
    assert_eq!(id.display_name, "Mara R.");
    assert_eq!(id.email, "mara@example.com");
    assert_eq!(id.favorite_species, vec!["blue-whale".to_string()]);
  }

  #[test]
  fn role_round_trips_through_text() {
    for role in [Role::User, Role::Researcher, Role::Admin] {
      assert_eq!(Role::parse(role.as_str()).unwrap(), role);
    }
    assert!(Role::parse("superuser").is_err());
  }
}
