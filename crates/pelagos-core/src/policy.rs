//! The admin access policy — a single, injected allow-list.
//!
//! Both the HTTP route layer and the client-side admin gate consult the
//! same [`SharedPolicy`] instance, so the two admission checks cannot
//! diverge. The policy is built once at startup from configuration and is
//! never persisted; grants last for the lifetime of the process.

use std::{
  collections::HashSet,
  sync::{Arc, RwLock},
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::Identity;

/// Identifiers granted admin access.
///
/// Entries are plain strings rather than UUIDs: configured lists may carry
/// ids from foreign systems that are not UUID-shaped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessPolicy {
  ids:    HashSet<String>,
  emails: HashSet<String>,
}

impl AccessPolicy {
  pub fn new(
    ids: impl IntoIterator<Item = String>,
    emails: impl IntoIterator<Item = String>,
  ) -> Self {
    Self {
      ids:    ids.into_iter().collect(),
      emails: emails.into_iter().collect(),
    }
  }

  /// Pure admission check: `id ∈ ids ∨ email ∈ emails`.
  pub fn admits(&self, id: Uuid, email: &str) -> bool {
    self.ids.contains(&id.to_string()) || self.emails.contains(email)
  }

  pub fn admits_identity(&self, identity: &Identity) -> bool {
    self.admits(identity.id, &identity.email)
  }

  /// Add an identity to the allow-list for the remainder of the process.
  ///
  /// This is the explicit, audited form of the temporary-admin action; it
  /// is not a security boundary and nothing here survives a restart.
  pub fn grant(&mut self, id: Uuid, email: &str) {
    tracing::warn!(%id, email, "granting temporary admin access");
    self.ids.insert(id.to_string());
    self.emails.insert(email.to_string());
  }

  /// Allow-listed ids, sorted for stable display.
  pub fn ids(&self) -> Vec<String> {
    let mut ids: Vec<String> = self.ids.iter().cloned().collect();
    ids.sort();
    ids
  }

  /// Allow-listed emails, sorted for stable display.
  pub fn emails(&self) -> Vec<String> {
    let mut emails: Vec<String> = self.emails.iter().cloned().collect();
    emails.sort();
    emails
  }
}

/// The process-wide policy handle shared between the route layer and the
/// client gate.
pub type SharedPolicy = Arc<RwLock<AccessPolicy>>;

pub fn shared(policy: AccessPolicy) -> SharedPolicy {
  Arc::new(RwLock::new(policy))
}

/// The one admission check both the HTTP layer and the client gate use:
/// an `admin` metadata role, or membership in the shared allow-list.
pub fn admin_admitted(policy: &SharedPolicy, identity: &Identity) -> bool {
  identity.role.is_admin()
    || policy
      .read()
      .map(|p| p.admits_identity(identity))
      .unwrap_or(false)
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::identity::Role;

  fn identity(id: Uuid, email: &str) -> Identity {
    Identity {
      id,
      display_name: "Test".to_string(),
      email: email.to_string(),
      avatar_url: None,
      role: Role::User,
      join_date: Utc::now(),
      favorite_species: vec![],
    }
  }

  #[test]
  fn admits_by_id_or_email_only() {
    let listed_id = Uuid::new_v4();
    let policy = AccessPolicy::new(
      [listed_id.to_string()],
      ["admin@example.com".to_string()],
    );

    assert!(policy.admits(listed_id, "nobody@example.com"));
    assert!(policy.admits(Uuid::new_v4(), "admin@example.com"));
    assert!(!policy.admits(Uuid::new_v4(), "nobody@example.com"));
  }

  #[test]
  fn admits_matches_set_membership_for_any_identity() {
    let listed_id = Uuid::new_v4();
    let policy = AccessPolicy::new(
      [listed_id.to_string()],
      ["admin@example.com".to_string()],
    );

    for (id, email) in [
      (listed_id, "x@example.com"),
      (Uuid::new_v4(), "admin@example.com"),
      (Uuid::new_v4(), "x@example.com"),
      (listed_id, "admin@example.com"),
    ] {
      let expected = policy.ids().contains(&id.to_string())
        || policy.emails().contains(&email.to_string());
      assert_eq!(policy.admits_identity(&identity(id, email)), expected);
    }
  }

  #[test]
  fn grant_is_visible_on_next_check() {
    let mut policy = AccessPolicy::default();
    let me = identity(Uuid::new_v4(), "me@example.com");

    assert!(!policy.admits_identity(&me));
    policy.grant(me.id, &me.email);
    assert!(policy.admits_identity(&me));
  }
}
