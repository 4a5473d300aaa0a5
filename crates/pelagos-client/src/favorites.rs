//! The favorites coordinator — serialized toggles over the favorites edge.
//!
//! A toggle reads the edge's current state and writes its inverse. Because
//! the read and the write are two store round-trips, a second toggle of the
//! same `(user, species)` control while one is in flight would race; the
//! coordinator latches each control and rejects the overlap with
//! [`Error::Busy`] instead of queueing it.

use std::{
  collections::HashSet,
  sync::{Arc, Mutex},
};

use uuid::Uuid;

use pelagos_core::store::DataStore;

use crate::error::{Error, Result};

/// What a completed toggle resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
  pub now_favorited: bool,
}

pub struct FavoriteCoordinator<S> {
  store:    Arc<S>,
  inflight: Mutex<HashSet<(Uuid, String)>>,
}

/// Removes the control's in-flight mark when the toggle resolves, on every
/// exit path.
struct Latch<'a> {
  inflight: &'a Mutex<HashSet<(Uuid, String)>>,
  key:      (Uuid, String),
}

impl Drop for Latch<'_> {
  fn drop(&mut self) {
    if let Ok(mut inflight) = self.inflight.lock() {
      inflight.remove(&self.key);
    }
  }
}

impl<S: DataStore> FavoriteCoordinator<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      store,
      inflight: Mutex::new(HashSet::new()),
    }
  }

  fn latch(&self, user_id: Uuid, species_id: &str) -> Result<Latch<'_>> {
    let key = (user_id, species_id.to_string());
    let mut inflight = match self.inflight.lock() {
      Ok(guard) => guard,
      Err(poisoned) => poisoned.into_inner(),
    };
    if !inflight.insert(key.clone()) {
      return Err(Error::Busy);
    }
    Ok(Latch {
      inflight: &self.inflight,
      key,
    })
  }

  /// Whether the edge exists right now. `Ok(false)` means confirmed absent;
  /// a store fault is an `Err`, so callers never render "not favorited"
  /// when the truth is unknown.
  pub async fn status(&self, user_id: Uuid, species_id: &str) -> Result<bool> {
    self
      .store
      .is_favorited(user_id, species_id)
      .await
      .map_err(Error::store)
  }

  /// Read the edge and write its inverse. Concurrent toggles of the same
  /// control fail fast with [`Error::Busy`]; the first one keeps running.
  pub async fn toggle(
    &self,
    user_id: Uuid,
    species_id: &str,
  ) -> Result<ToggleOutcome> {
    let _latch = self.latch(user_id, species_id)?;
    let favorited = self
      .store
      .is_favorited(user_id, species_id)
      .await
      .map_err(Error::store)?;
    if favorited {
      self
        .store
        .remove_favorite(user_id, species_id)
        .await
        .map_err(Error::store)?;
    } else {
      self
        .store
        .add_favorite(user_id, species_id)
        .await
        .map_err(Error::store)?;
    }
    Ok(ToggleOutcome {
      now_favorited: !favorited,
    })
  }
}

#[cfg(test)]
mod tests {
  use pelagos_core::identity::NewAccount;
  use pelagos_store_sqlite::SqliteStore;

  use super::*;
  use crate::testing::ScriptedStore;

  async fn store_with_account() -> (Arc<SqliteStore>, Uuid) {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let account = store
      .sign_up(NewAccount {
        display_name: "Mara".to_string(),
        email:        "mara@example.com".to_string(),
        password:     "deep-sea-7".to_string(),
      })
      .await
      .unwrap();
    (store, account.id)
  }

  #[tokio::test]
  async fn toggle_flips_membership_both_ways() {
    let (store, user) = store_with_account().await;
    let coordinator = FavoriteCoordinator::new(Arc::clone(&store));

    assert!(!coordinator.status(user, "orca").await.unwrap());

    let on = coordinator.toggle(user, "orca").await.unwrap();
    assert!(on.now_favorited);
    assert!(coordinator.status(user, "orca").await.unwrap());

    let off = coordinator.toggle(user, "orca").await.unwrap();
    assert!(!off.now_favorited);
    assert!(!coordinator.status(user, "orca").await.unwrap());
  }

  #[tokio::test]
  async fn controls_for_different_species_are_independent() {
    let (store, user) = store_with_account().await;
    let coordinator = FavoriteCoordinator::new(store);

    coordinator.toggle(user, "orca").await.unwrap();
    coordinator.toggle(user, "manta-ray").await.unwrap();
    coordinator.toggle(user, "manta-ray").await.unwrap();

    assert!(coordinator.status(user, "orca").await.unwrap());
    assert!(!coordinator.status(user, "manta-ray").await.unwrap());
  }

  #[tokio::test]
  async fn overlapping_toggle_of_same_control_is_busy() {
    let (inner, user) = store_with_account().await;
    let store = Arc::new(ScriptedStore::new(inner));
    let coordinator = Arc::new(FavoriteCoordinator::new(Arc::clone(&store)));

    store.hold_favorite_read();
    let first = {
      let coordinator = Arc::clone(&coordinator);
      tokio::spawn(async move { coordinator.toggle(user, "orca").await })
    };
    store.entered_favorite_read().await;

    // The first toggle is suspended mid-flight; a second one must fail
    // fast rather than queue.
    let second = coordinator.toggle(user, "orca").await;
    assert!(matches!(second, Err(Error::Busy)));

    store.release_favorite_read();
    let outcome = first.await.unwrap().unwrap();
    assert!(outcome.now_favorited);

    // The latch is released once the first toggle resolves.
    let third = coordinator.toggle(user, "orca").await.unwrap();
    assert!(!third.now_favorited);
  }

  #[tokio::test]
  async fn status_for_unknown_user_is_absent_not_error() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let coordinator = FavoriteCoordinator::new(store);

    assert!(!coordinator.status(Uuid::new_v4(), "orca").await.unwrap());
  }
}
