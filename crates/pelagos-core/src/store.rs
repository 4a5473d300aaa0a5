//! The `DataStore` trait and supporting query types.
//!
//! The trait abstracts the hosted data store (auth, table CRUD, change
//! feeds). It is implemented by storage backends (e.g.
//! `pelagos-store-sqlite`); higher layers (`pelagos-client`, `pelagos-api`)
//! depend on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::{
  event::{AuthEvent, AuthSession, ResourceChange},
  identity::{Identity, IdentityPatch, NewAccount, Role},
  resource::ResourceRecord,
};

// ─── Admin and diagnostic types ──────────────────────────────────────────────

/// One row of the admin user listing — a projection of the account record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRow {
  pub id:           Uuid,
  pub email:        String,
  pub display_name: String,
  pub role:         Role,
  pub avatar_url:   Option<String>,
  pub created_at:   DateTime<Utc>,
  pub is_banned:    bool,
}

/// Fields an administrator may change on another account.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminUserUpdate {
  pub display_name: Option<String>,
  pub role:         Option<Role>,
  pub is_banned:    Option<bool>,
}

/// Row count, sample rows, and column names for one table — the payload of
/// the per-table diagnostic probe.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSample {
  pub count:   u64,
  pub columns: Vec<String>,
  pub rows:    Vec<serde_json::Value>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the remote data store.
///
/// Read failures caused by absence (no session, no edge, no row) are `Ok`
/// values — `None`, `false`, or an empty list. `Err` is reserved for store
/// faults, so callers never conflate "empty" with "broken".
///
/// All async methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait DataStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Auth ──────────────────────────────────────────────────────────────

  /// Create an account with `role = user` and the display name in user
  /// metadata. Registering an already-taken email is an error. No separate
  /// profile row is created — auth metadata is the single source of truth
  /// for identity fields.
  fn sign_up(
    &self,
    new: NewAccount,
  ) -> impl Future<Output = Result<Identity, Self::Error>> + Send + '_;

  /// Verify credentials and mint a session. On success the session becomes
  /// current and a [`AuthEvent::SignedIn`] is emitted.
  fn sign_in<'a>(
    &'a self,
    email: &'a str,
    password: &'a str,
  ) -> impl Future<Output = Result<AuthSession, Self::Error>> + Send + 'a;

  /// Invalidate `token`. Emits [`AuthEvent::SignedOut`] even if the token
  /// was already gone, so every subscriber settles on the same state.
  fn sign_out<'a>(
    &'a self,
    token: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// The session most recently handed out by this store, if still valid.
  fn current_session(
    &self,
  ) -> impl Future<Output = Result<Option<AuthSession>, Self::Error>> + Send + '_;

  /// Resolve a bearer token to its session. `None` for unknown or revoked
  /// tokens.
  fn session_for_token<'a>(
    &'a self,
    token: &'a str,
  ) -> impl Future<Output = Result<Option<AuthSession>, Self::Error>> + Send + 'a;

  /// Write the changed metadata fields and return the merged identity.
  fn update_metadata(
    &self,
    user_id: Uuid,
    patch: IdentityPatch,
  ) -> impl Future<Output = Result<Identity, Self::Error>> + Send + '_;

  /// Subscribe to auth-state transitions. Events arrive in emission order.
  fn auth_events(&self) -> broadcast::Receiver<AuthEvent>;

  // ── Favorites ─────────────────────────────────────────────────────────

  /// Whether the `(user, species)` edge exists. Absence is `Ok(false)`.
  fn is_favorited<'a>(
    &'a self,
    user_id: Uuid,
    species_id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Create the edge. Idempotent — inserting an existing edge is a no-op.
  fn add_favorite<'a>(
    &'a self,
    user_id: Uuid,
    species_id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove the edge. Idempotent — deleting a missing edge is a no-op.
  fn remove_favorite<'a>(
    &'a self,
    user_id: Uuid,
    species_id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// All species ids favorited by `user_id`.
  fn list_favorites(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  // ── Resources ─────────────────────────────────────────────────────────

  /// Full read of the resources table, field-mapped from storage naming to
  /// display naming.
  fn list_resources(
    &self,
  ) -> impl Future<Output = Result<Vec<ResourceRecord>, Self::Error>> + Send + '_;

  /// Insert a resource. Emits [`ResourceChange::Inserted`].
  fn create_resource(
    &self,
    record: ResourceRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Replace a resource by id. Emits [`ResourceChange::Updated`].
  fn update_resource(
    &self,
    record: ResourceRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete a resource by id. Emits [`ResourceChange::Deleted`].
  fn delete_resource<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Subscribe to row-level change notices for the resources table.
  fn resource_events(&self) -> broadcast::Receiver<ResourceChange>;

  // ── Admin ─────────────────────────────────────────────────────────────

  /// All account rows, newest first.
  fn list_profiles(
    &self,
  ) -> impl Future<Output = Result<Vec<ProfileRow>, Self::Error>> + Send + '_;

  /// Apply an administrative update to one account. `None` when the id is
  /// unknown.
  fn update_profile(
    &self,
    id: Uuid,
    update: AdminUserUpdate,
  ) -> impl Future<Output = Result<Option<ProfileRow>, Self::Error>> + Send + '_;

  // ── Diagnostics ───────────────────────────────────────────────────────

  /// Names of the tables this store exposes to the diagnostic probe.
  fn table_names(&self) -> Vec<String>;

  /// Row count for one named table.
  fn table_count<'a>(
    &'a self,
    table: &'a str,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;

  /// Row count, up to `limit` sample rows, and column names for one table.
  fn table_sample<'a>(
    &'a self,
    table: &'a str,
    limit: u32,
  ) -> impl Future<Output = Result<TableSample, Self::Error>> + Send + 'a;
}
