//! The session manager — owner of the current authenticated identity.
//!
//! State machine: `Uninitialized → Loading → { Authenticated, Anonymous }`.
//! After the initial lookup, state is driven exclusively by the store's
//! auth-event channel; every event fully replaces the identity so multiple
//! tabs can never drift apart field-by-field.
//!
//! A slow initial lookup must not clobber a newer event: every applied
//! transition bumps an epoch counter, and the `initialize()` result is
//! discarded if the epoch moved while the lookup was in flight.

use std::{
  sync::{Arc, Mutex, MutexGuard, atomic::{AtomicBool, Ordering}},
  time::Duration,
};

use tokio::{
  sync::{broadcast, watch},
  task::JoinHandle,
};

use pelagos_core::{
  event::AuthEvent,
  identity::{Identity, IdentityPatch, NewAccount},
  store::DataStore,
};

/// How long the initial session lookup may take before it resolves to
/// `Anonymous`. The source system had no bound here; a hung request left
/// the UI loading forever.
pub const DEFAULT_INIT_TIMEOUT: Duration = Duration::from_secs(10);

// ─── State ───────────────────────────────────────────────────────────────────

/// The derived session — exactly one per running client process.
#[derive(Debug, Clone)]
pub enum SessionState {
  Uninitialized,
  Loading,
  Authenticated(Identity),
  Anonymous,
}

impl SessionState {
  /// `true` until the initial lookup has resolved one way or the other.
  pub fn is_loading(&self) -> bool {
    matches!(self, Self::Uninitialized | Self::Loading)
  }

  pub fn is_authenticated(&self) -> bool {
    matches!(self, Self::Authenticated(_))
  }

  pub fn identity(&self) -> Option<&Identity> {
    match self {
      Self::Authenticated(identity) => Some(identity),
      _ => None,
    }
  }
}

struct Inner {
  /// Bumped on every applied transition; lets `initialize()` detect that
  /// it lost the race against an auth event.
  epoch: u64,
  /// Token of the session we hold, used to sign out.
  token: Option<String>,
}

// ─── Manager ─────────────────────────────────────────────────────────────────

/// Owns the session state machine for one client process.
pub struct SessionManager<S> {
  store:        Arc<S>,
  state:        watch::Sender<SessionState>,
  inner:        Mutex<Inner>,
  init_timeout: Duration,
  initialized:  AtomicBool,
}

impl<S: DataStore + 'static> SessionManager<S> {
  pub fn new(store: Arc<S>) -> Arc<Self> {
    Self::with_init_timeout(store, DEFAULT_INIT_TIMEOUT)
  }

  pub fn with_init_timeout(store: Arc<S>, init_timeout: Duration) -> Arc<Self> {
    let (state, _) = watch::channel(SessionState::Uninitialized);
    Arc::new(Self {
      store,
      state,
      inner: Mutex::new(Inner { epoch: 0, token: None }),
      init_timeout,
      initialized: AtomicBool::new(false),
    })
  }

  fn lock_inner(&self) -> MutexGuard<'_, Inner> {
    match self.inner.lock() {
      Ok(guard) => guard,
      Err(poisoned) => poisoned.into_inner(),
    }
  }

  /// Spawn the event pump consuming the store's auth channel. Events are
  /// applied in arrival order; the task ends when the store closes the
  /// channel.
  pub fn start(self: &Arc<Self>) -> JoinHandle<()> {
    let manager = Arc::clone(self);
    let mut events = manager.store.auth_events();
    tokio::spawn(async move {
      loop {
        match events.recv().await {
          Ok(event) => manager.apply_event(&event),
          Err(broadcast::error::RecvError::Lagged(missed)) => {
            tracing::warn!(missed, "auth event channel lagged");
          }
          Err(broadcast::error::RecvError::Closed) => break,
        }
      }
    })
  }

  /// Query the store for an existing session. Runs at most once; all paths
  /// (session found, none, store error, timeout) leave `Loading`.
  pub async fn initialize(&self) {
    if self.initialized.swap(true, Ordering::SeqCst) {
      return;
    }
    self.state.send_replace(SessionState::Loading);
    let before = self.lock_inner().epoch;

    let resolved =
      match tokio::time::timeout(self.init_timeout, self.store.current_session())
        .await
      {
        Ok(Ok(session)) => session,
        Ok(Err(e)) => {
          tracing::error!(error = %e, "initial session lookup failed");
          None
        }
        Err(_) => {
          tracing::error!(
            timeout = ?self.init_timeout,
            "initial session lookup timed out"
          );
          None
        }
      };

    let mut inner = self.lock_inner();
    if inner.epoch != before {
      // An auth event arrived while the lookup was in flight; the lookup
      // result is stale and must not overwrite it.
      tracing::debug!("discarding stale initialize result");
      return;
    }
    inner.epoch += 1;
    match resolved {
      Some(session) => {
        inner.token = Some(session.token.clone());
        self
          .state
          .send_replace(SessionState::Authenticated(session.user));
      }
      None => {
        self.state.send_replace(SessionState::Anonymous);
      }
    }
  }

  /// Apply one auth event. Idempotent; the identity is always replaced
  /// wholesale from the event's session, never patched.
  pub fn apply_event(&self, event: &AuthEvent) {
    let mut inner = self.lock_inner();
    inner.epoch += 1;
    match event.session() {
      Some(session) => {
        inner.token = Some(session.token.clone());
        self
          .state
          .send_replace(SessionState::Authenticated(session.user.clone()));
      }
      None => {
        inner.token = None;
        self.state.send_replace(SessionState::Anonymous);
      }
    }
  }

  /// Password sign-in. Returns `false` on failure. On success the identity
  /// arrives via the subsequent auth event — callers must not assume it is
  /// populated when this returns.
  pub async fn login(&self, email: &str, password: &str) -> bool {
    match self.store.sign_in(email, password).await {
      Ok(_) => true,
      Err(e) => {
        tracing::warn!(error = %e, "login failed");
        false
      }
    }
  }

  /// Create an account. Returns an error message on failure, `None` on
  /// success. The store holds the single source of truth for identity
  /// fields; no profile row is created here.
  pub async fn register(
    &self,
    name: &str,
    email: &str,
    password: &str,
  ) -> Option<String> {
    let new = NewAccount {
      display_name: name.to_string(),
      email:        email.to_string(),
      password:     password.to_string(),
    };
    match self.store.sign_up(new).await {
      Ok(_) => None,
      Err(e) => {
        tracing::warn!(error = %e, "registration failed");
        Some(e.to_string())
      }
    }
  }

  /// Invalidate the store session. The local identity is cleared before
  /// the store call resolves, so no authenticated UI flashes in between.
  pub async fn logout(&self) {
    let token = {
      let mut inner = self.lock_inner();
      inner.epoch += 1;
      self.state.send_replace(SessionState::Anonymous);
      inner.token.take()
    };
    if let Some(token) = token
      && let Err(e) = self.store.sign_out(&token).await
    {
      tracing::warn!(error = %e, "sign-out failed");
    }
  }

  /// Write changed metadata fields to the store; on success, shallow-merge
  /// them into the local identity optimistically.
  pub async fn update_user(&self, patch: IdentityPatch) -> bool {
    let Some(identity) = self.identity() else {
      return false;
    };
    match self.store.update_metadata(identity.id, patch.clone()).await {
      Ok(_) => {
        let mut inner = self.lock_inner();
        let current = self.state.borrow().clone();
        if let SessionState::Authenticated(mut identity) = current {
          identity.apply(&patch);
          inner.epoch += 1;
          self
            .state
            .send_replace(SessionState::Authenticated(identity));
        }
        true
      }
      Err(e) => {
        tracing::warn!(error = %e, "metadata update failed");
        false
      }
    }
  }

  // ── Derived accessors ─────────────────────────────────────────────────

  pub fn state(&self) -> SessionState {
    self.state.borrow().clone()
  }

  /// Watch every state transition — what dependent views subscribe to.
  pub fn subscribe(&self) -> watch::Receiver<SessionState> {
    self.state.subscribe()
  }

  pub fn identity(&self) -> Option<Identity> {
    self.state.borrow().identity().cloned()
  }

  pub fn is_authenticated(&self) -> bool {
    self.state.borrow().is_authenticated()
  }

  pub fn is_loading(&self) -> bool {
    self.state.borrow().is_loading()
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
