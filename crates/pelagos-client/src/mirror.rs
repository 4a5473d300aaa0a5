//! The resource mirror — a read-mostly local copy of the resources table.
//!
//! Change notices from the store carry an id but no ordering guarantee
//! relative to concurrent writes, so the mirror never patches rows in
//! place: every notice invalidates the snapshot and triggers a full
//! refetch. The snapshot therefore always equals some complete store
//! read, never a splice of two.

use std::sync::Arc;

use tokio::{
  sync::{broadcast, watch},
  task::JoinHandle,
};

use pelagos_core::{resource::ResourceRecord, store::DataStore};

use crate::fallback;

/// Where the current snapshot's rows came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrigin {
  /// The static library compiled into the client.
  Bundled,
  /// A successful store read.
  Live,
}

#[derive(Debug, Clone)]
pub struct Snapshot {
  pub records: Vec<ResourceRecord>,
  pub origin:  SnapshotOrigin,
}

impl Snapshot {
  fn bundled() -> Self {
    Self {
      records: fallback::bundled_resources(),
      origin:  SnapshotOrigin::Bundled,
    }
  }
}

pub struct ResourceMirror<S> {
  store:    Arc<S>,
  snapshot: watch::Sender<Snapshot>,
}

impl<S: DataStore + 'static> ResourceMirror<S> {
  /// A new mirror, seeded with the bundled library so there is always
  /// something to render before the first fetch resolves.
  pub fn new(store: Arc<S>) -> Arc<Self> {
    let (snapshot, _) = watch::channel(Snapshot::bundled());
    Arc::new(Self { store, snapshot })
  }

  pub fn snapshot(&self) -> Snapshot {
    self.snapshot.borrow().clone()
  }

  pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
    self.snapshot.subscribe()
  }

  /// Replace the snapshot with a fresh full read. Only a failed read falls
  /// back to the bundled library; a successful read always wins, even an
  /// empty one, so a delete that empties the table still converges.
  pub async fn refresh(&self) {
    match self.store.list_resources().await {
      Ok(records) => {
        self.snapshot.send_replace(Snapshot {
          records,
          origin: SnapshotOrigin::Live,
        });
      }
      Err(e) => {
        tracing::warn!(error = %e, "resource fetch failed, serving bundled library");
        self.snapshot.send_replace(Snapshot::bundled());
      }
    }
  }

  /// Spawn the invalidate-and-refetch pump: one initial refresh, then a
  /// full refetch on every change notice. The notice's payload is never
  /// applied directly.
  pub fn start(self: &Arc<Self>) -> MirrorHandle {
    let mirror = Arc::clone(self);
    let mut changes = mirror.store.resource_events();
    let task = tokio::spawn(async move {
      mirror.refresh().await;
      loop {
        match changes.recv().await {
          Ok(change) => {
            tracing::debug!(?change, "resource change notice, refetching");
            mirror.refresh().await;
          }
          Err(broadcast::error::RecvError::Lagged(missed)) => {
            // Missed notices are harmless: the refetch is already total.
            tracing::warn!(missed, "resource change channel lagged");
            mirror.refresh().await;
          }
          Err(broadcast::error::RecvError::Closed) => break,
        }
      }
    });
    MirrorHandle { task }
  }
}

/// Owns the pump task; dropping it tears the subscription down so a
/// navigated-away mirror stops fetching.
pub struct MirrorHandle {
  task: JoinHandle<()>,
}

impl MirrorHandle {
  pub fn stop(self) {
    self.task.abort();
  }
}

impl Drop for MirrorHandle {
  fn drop(&mut self) {
    self.task.abort();
  }
}
