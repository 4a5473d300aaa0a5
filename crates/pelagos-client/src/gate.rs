//! The admin gate — page-level admission derived from session + policy.
//!
//! The gate never performs its own lookups; it evaluates the session
//! manager's current state against the same [`SharedPolicy`] the HTTP
//! layer consults, so the two admission surfaces cannot disagree.

use std::sync::Arc;

use uuid::Uuid;

use pelagos_core::{
  identity::Identity,
  policy::{SharedPolicy, admin_admitted},
  store::DataStore,
};

use crate::session::{SessionManager, SessionState};

/// Why admission was refused, for display on the denial screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
  NotSignedIn,
  NotAdmitted,
}

/// What the denial screen shows: the reason, enough of the identity for
/// the visitor to see who the check ran against, and the current
/// allow-list contents so they can compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenialNotice {
  pub reason:         DenialReason,
  pub user_id:        Option<Uuid>,
  pub email:          Option<String>,
  pub allowed_ids:    Vec<String>,
  pub allowed_emails: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
  /// Session not yet resolved; render nothing rather than flash a denial.
  Checking,
  Granted,
  Denied(DenialNotice),
}

pub struct AdminGate<S> {
  session: Arc<SessionManager<S>>,
  policy:  SharedPolicy,
}

impl<S: DataStore + 'static> AdminGate<S> {
  pub fn new(session: Arc<SessionManager<S>>, policy: SharedPolicy) -> Self {
    Self { session, policy }
  }

  /// Evaluate admission against the current session state.
  pub fn evaluate(&self) -> GateState {
    match self.session.state() {
      SessionState::Uninitialized | SessionState::Loading => {
        GateState::Checking
      }
      SessionState::Anonymous => {
        GateState::Denied(self.notice(DenialReason::NotSignedIn, None))
      }
      SessionState::Authenticated(identity) => {
        if admin_admitted(&self.policy, &identity) {
          GateState::Granted
        } else {
          GateState::Denied(
            self.notice(DenialReason::NotAdmitted, Some(identity)),
          )
        }
      }
    }
  }

  fn notice(
    &self,
    reason: DenialReason,
    identity: Option<Identity>,
  ) -> DenialNotice {
    let (allowed_ids, allowed_emails) = self
      .policy
      .read()
      .map(|p| (p.ids(), p.emails()))
      .unwrap_or_default();
    DenialNotice {
      reason,
      user_id: identity.as_ref().map(|i| i.id),
      email: identity.map(|i| i.email),
      allowed_ids,
      allowed_emails,
    }
  }

  /// Allow-list the signed-in identity for the rest of the process and
  /// re-evaluate. The grant itself is audited by the policy.
  pub fn grant_self(&self) -> GateState {
    if let Some(identity) = self.session.identity()
      && let Ok(mut policy) = self.policy.write()
    {
      policy.grant(identity.id, &identity.email);
    }
    self.evaluate()
  }
}
