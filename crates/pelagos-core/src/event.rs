//! Push events emitted by the store.
//!
//! The auth channel delivers events in emission order to each subscriber.
//! The resource channel carries row-level change notices whose payload is
//! advisory only — consumers reconcile by refetching, never by patching.

use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// A live session handed out by the store on sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
  pub token: String,
  pub user:  Identity,
}

/// An auth-state transition pushed by the store.
#[derive(Debug, Clone)]
pub enum AuthEvent {
  SignedIn(AuthSession),
  SignedOut,
  TokenRefreshed(AuthSession),
}

impl AuthEvent {
  /// The session carried by this event, if any.
  pub fn session(&self) -> Option<&AuthSession> {
    match self {
      Self::SignedIn(s) | Self::TokenRefreshed(s) => Some(s),
      Self::SignedOut => None,
    }
  }
}

/// A row-level change notice for the resources table. The id identifies
/// the affected row but says nothing about ordering relative to concurrent
/// writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
  Inserted(String),
  Updated(String),
  Deleted(String),
}
