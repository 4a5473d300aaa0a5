//! Test doubles shared by the crate's unit tests.
//!
//! [`ScriptedStore`] wraps a real in-memory [`SqliteStore`] and adds
//! injectable suspensions and failures, so tests can pin down orderings
//! (a lookup suspended across an auth event, a toggle held in flight) and
//! outages (a failing table read) that the real store never produces on
//! demand.

use std::sync::{
  Arc,
  atomic::{AtomicBool, Ordering},
};

use chrono::Utc;
use pelagos_core::{
  event::{AuthEvent, AuthSession, ResourceChange},
  identity::{Identity, IdentityPatch, NewAccount, Role},
  resource::ResourceRecord,
  store::{AdminUserUpdate, DataStore, ProfileRow, TableSample},
};
use pelagos_store_sqlite::SqliteStore;
use thiserror::Error;
use tokio::sync::{Notify, broadcast};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ScriptedError {
  #[error("injected store failure")]
  Injected,
  #[error(transparent)]
  Inner(#[from] pelagos_store_sqlite::Error),
}

/// A gate one store method can block on until the test releases it.
struct Gate {
  held:     AtomicBool,
  entered:  Notify,
  released: Notify,
}

impl Gate {
  fn new() -> Self {
    Self {
      held:     AtomicBool::new(false),
      entered:  Notify::new(),
      released: Notify::new(),
    }
  }

  async fn pass(&self) {
    if self.held.load(Ordering::SeqCst) {
      self.entered.notify_one();
      self.released.notified().await;
    }
  }
}

pub struct ScriptedStore {
  inner:           Arc<SqliteStore>,
  session_gate:    Gate,
  favorite_gate:   Gate,
  fail_list:       AtomicBool,
}

impl ScriptedStore {
  pub fn new(inner: Arc<SqliteStore>) -> Self {
    Self {
      inner,
      session_gate: Gate::new(),
      favorite_gate: Gate::new(),
      fail_list: AtomicBool::new(false),
    }
  }

  /// Make the next `current_session` call suspend until released.
  pub fn hold_current_session(&self) {
    self.session_gate.held.store(true, Ordering::SeqCst);
  }

  /// Wait until a held `current_session` call is suspended inside the store.
  pub async fn entered_current_session(&self) {
    self.session_gate.entered.notified().await;
  }

  pub fn release_current_session(&self) {
    self.session_gate.held.store(false, Ordering::SeqCst);
    self.session_gate.released.notify_one();
  }

  /// Make the next `is_favorited` call suspend until released.
  pub fn hold_favorite_read(&self) {
    self.favorite_gate.held.store(true, Ordering::SeqCst);
  }

  pub async fn entered_favorite_read(&self) {
    self.favorite_gate.entered.notified().await;
  }

  pub fn release_favorite_read(&self) {
    self.favorite_gate.held.store(false, Ordering::SeqCst);
    self.favorite_gate.released.notify_one();
  }

  /// Fail every `list_resources` call until cleared.
  pub fn fail_list_resources(&self, fail: bool) {
    self.fail_list.store(fail, Ordering::SeqCst);
  }
}

impl DataStore for ScriptedStore {
  type Error = ScriptedError;

  async fn sign_up(&self, new: NewAccount) -> Result<Identity, ScriptedError> {
    Ok(self.inner.sign_up(new).await?)
  }

  async fn sign_in(
    &self,
    email: &str,
    password: &str,
  ) -> Result<AuthSession, ScriptedError> {
    Ok(self.inner.sign_in(email, password).await?)
  }

  async fn sign_out(&self, token: &str) -> Result<(), ScriptedError> {
    Ok(self.inner.sign_out(token).await?)
  }

  async fn current_session(
    &self,
  ) -> Result<Option<AuthSession>, ScriptedError> {
    self.session_gate.pass().await;
    Ok(self.inner.current_session().await?)
  }

  async fn session_for_token(
    &self,
    token: &str,
  ) -> Result<Option<AuthSession>, ScriptedError> {
    Ok(self.inner.session_for_token(token).await?)
  }

  async fn update_metadata(
    &self,
    user_id: Uuid,
    patch: IdentityPatch,
  ) -> Result<Identity, ScriptedError> {
    Ok(self.inner.update_metadata(user_id, patch).await?)
  }

  fn auth_events(&self) -> broadcast::Receiver<AuthEvent> {
    self.inner.auth_events()
  }

  async fn is_favorited(
    &self,
    user_id: Uuid,
    species_id: &str,
  ) -> Result<bool, ScriptedError> {
    self.favorite_gate.pass().await;
    Ok(self.inner.is_favorited(user_id, species_id).await?)
  }

  async fn add_favorite(
    &self,
    user_id: Uuid,
    species_id: &str,
  ) -> Result<(), ScriptedError> {
    Ok(self.inner.add_favorite(user_id, species_id).await?)
  }

  async fn remove_favorite(
    &self,
    user_id: Uuid,
    species_id: &str,
  ) -> Result<(), ScriptedError> {
    Ok(self.inner.remove_favorite(user_id, species_id).await?)
  }

  async fn list_favorites(
    &self,
    user_id: Uuid,
  ) -> Result<Vec<String>, ScriptedError> {
    Ok(self.inner.list_favorites(user_id).await?)
  }

  async fn list_resources(
    &self,
  ) -> Result<Vec<ResourceRecord>, ScriptedError> {
    if self.fail_list.load(Ordering::SeqCst) {
      return Err(ScriptedError::Injected);
    }
    Ok(self.inner.list_resources().await?)
  }

  async fn create_resource(
    &self,
    record: ResourceRecord,
  ) -> Result<(), ScriptedError> {
    Ok(self.inner.create_resource(record).await?)
  }

  async fn update_resource(
    &self,
    record: ResourceRecord,
  ) -> Result<(), ScriptedError> {
    Ok(self.inner.update_resource(record).await?)
  }

  async fn delete_resource(&self, id: &str) -> Result<(), ScriptedError> {
    Ok(self.inner.delete_resource(id).await?)
  }

  fn resource_events(&self) -> broadcast::Receiver<ResourceChange> {
    self.inner.resource_events()
  }

  async fn list_profiles(&self) -> Result<Vec<ProfileRow>, ScriptedError> {
    Ok(self.inner.list_profiles().await?)
  }

  async fn update_profile(
    &self,
    id: Uuid,
    update: AdminUserUpdate,
  ) -> Result<Option<ProfileRow>, ScriptedError> {
    Ok(self.inner.update_profile(id, update).await?)
  }

  fn table_names(&self) -> Vec<String> {
    self.inner.table_names()
  }

  async fn table_count(&self, table: &str) -> Result<u64, ScriptedError> {
    Ok(self.inner.table_count(table).await?)
  }

  async fn table_sample(
    &self,
    table: &str,
    limit: u32,
  ) -> Result<TableSample, ScriptedError> {
    Ok(self.inner.table_sample(table, limit).await?)
  }
}

/// A minimal resource row for mirror tests.
pub fn test_resource(id: &str) -> ResourceRecord {
  ResourceRecord {
    id: id.to_string(),
    title: format!("Resource {id}"),
    category: pelagos_core::resource::ResourceCategory::Education,
    excerpt: "".to_string(),
    author: "Test Author".to_string(),
    image_url: "https://example.com/image.jpg".to_string(),
    read_time: "5 min read".to_string(),
    date: "May 1, 2025".to_string(),
    featured: false,
  }
}

/// An identity with a fresh random id, for tests that inject auth events
/// directly rather than going through sign-up.
pub fn test_identity(email: &str) -> Identity {
  Identity {
    id: Uuid::new_v4(),
    display_name: "Test".to_string(),
    email: email.to_string(),
    avatar_url: None,
    role: Role::User,
    join_date: Utc::now(),
    favorite_species: vec![],
  }
}
