//! JSON HTTP surface for Pelagos.
//!
//! Exposes an axum [`Router`] with the admin and diagnostic endpoints,
//! backed by any [`pelagos_core::store::DataStore`]. Admin routes are
//! guarded by the bearer-token extractor in [`auth`]; the diagnostic
//! report is open.

pub mod auth;
pub mod diagnostic;
pub mod error;
pub mod stats;
pub mod users;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::get,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use pelagos_core::{policy::SharedPolicy, store::DataStore};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` plus
/// `PELAGOS_`-prefixed environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// User ids granted admin access regardless of metadata role.
  #[serde(default)]
  pub admin_ids:    Vec<String>,
  /// Emails granted admin access regardless of metadata role.
  #[serde(default)]
  pub admin_emails: Vec<String>,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: DataStore> {
  pub store:  Arc<S>,
  pub policy: SharedPolicy,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: DataStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route(
      "/api/admin/users",
      get(users::list::<S>).put(users::update::<S>),
    )
    .route("/api/admin/stats", get(stats::handler::<S>))
    .route(
      "/api/diagnostic",
      get(diagnostic::report::<S>).post(diagnostic::sample::<S>),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use pelagos_core::{
    identity::{NewAccount, Role},
    policy::{self, AccessPolicy},
    resource::{ResourceCategory, ResourceRecord},
    store::AdminUserUpdate,
  };
  use pelagos_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  async fn make_state(policy: AccessPolicy) -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState {
      store:  Arc::new(store),
      policy: policy::shared(policy),
    }
  }

  /// Sign up and sign in one account, returning its bearer token.
  async fn token_for(
    state: &AppState<SqliteStore>,
    email: &str,
    role: Role,
  ) -> String {
    let account = state
      .store
      .sign_up(NewAccount {
        display_name: "Test".to_string(),
        email:        email.to_string(),
        password:     "deep-sea-7".to_string(),
      })
      .await
      .unwrap();
    if role != Role::User {
      state
        .store
        .update_profile(account.id, AdminUserUpdate {
          role: Some(role),
          ..AdminUserUpdate::default()
        })
        .await
        .unwrap();
    }
    let session = state.store.sign_in(email, "deep-sea-7").await.unwrap();
    session.token
  }

  async fn oneshot(
    state: AppState<SqliteStore>,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
      builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    let resp = router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  fn resource(id: &str) -> ResourceRecord {
    ResourceRecord {
      id: id.to_string(),
      title: format!("Resource {id}"),
      category: ResourceCategory::Research,
      excerpt: "".to_string(),
      author: "Author".to_string(),
      image_url: "https://example.com/i.jpg".to_string(),
      read_time: "5 min read".to_string(),
      date: "May 1, 2025".to_string(),
      featured: false,
    }
  }

  // ── Auth layering ───────────────────────────────────────────────────────

  #[tokio::test]
  async fn admin_routes_without_token_return_401() {
    let state = make_state(AccessPolicy::default()).await;
    for uri in ["/api/admin/users", "/api/admin/stats"] {
      let (status, body) = oneshot(state.clone(), "GET", uri, None, None).await;
      assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
      assert!(body["error"].is_string(), "{uri}: {body}");
    }
  }

  #[tokio::test]
  async fn unknown_token_returns_401() {
    let state = make_state(AccessPolicy::default()).await;
    let (status, _) = oneshot(
      state,
      "GET",
      "/api/admin/users",
      Some("not-a-real-token"),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn plain_user_token_returns_403() {
    let state = make_state(AccessPolicy::default()).await;
    let token = token_for(&state, "user@example.com", Role::User).await;
    let (status, body) =
      oneshot(state, "GET", "/api/admin/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn allow_listed_email_is_admitted_without_admin_role() {
    let state = make_state(AccessPolicy::new(
      [],
      ["listed@example.com".to_string()],
    ))
    .await;
    let token = token_for(&state, "listed@example.com", Role::User).await;
    let (status, _) =
      oneshot(state, "GET", "/api/admin/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
  }

  // ── Users ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_users_returns_data_envelope() {
    let state = make_state(AccessPolicy::default()).await;
    let token = token_for(&state, "admin@example.com", Role::Admin).await;
    token_for(&state, "other@example.com", Role::User).await;

    let (status, body) =
      oneshot(state, "GET", "/api/admin/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0]["displayName"].is_string());
  }

  #[tokio::test]
  async fn update_user_applies_fields_and_echoes_row() {
    let state = make_state(AccessPolicy::default()).await;
    let token = token_for(&state, "admin@example.com", Role::Admin).await;
    let target = state
      .store
      .sign_up(NewAccount {
        display_name: "Target".to_string(),
        email:        "target@example.com".to_string(),
        password:     "deep-sea-7".to_string(),
      })
      .await
      .unwrap();

    let (status, body) = oneshot(
      state,
      "PUT",
      "/api/admin/users",
      Some(&token),
      Some(json!({
        "id": target.id,
        "name": "Renamed",
        "role": "researcher",
        "is_banned": true,
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["displayName"], "Renamed");
    assert_eq!(body["data"]["role"], "researcher");
    assert_eq!(body["data"]["isBanned"], true);
  }

  #[tokio::test]
  async fn malformed_update_body_gets_the_error_envelope() {
    let state = make_state(AccessPolicy::default()).await;
    let token = token_for(&state, "admin@example.com", Role::Admin).await;

    // An unknown role must come back as a 400 in the one error envelope,
    // not axum's plain-text rejection.
    let (status, body) = oneshot(
      state,
      "PUT",
      "/api/admin/users",
      Some(&token),
      Some(json!({ "id": Uuid::new_v4(), "role": "overlord" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");
  }

  #[tokio::test]
  async fn update_unknown_user_returns_404() {
    let state = make_state(AccessPolicy::default()).await;
    let token = token_for(&state, "admin@example.com", Role::Admin).await;

    let (status, body) = oneshot(
      state,
      "PUT",
      "/api/admin/users",
      Some(&token),
      Some(json!({ "id": Uuid::new_v4() })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
  }

  // ── Stats ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn stats_reports_camel_case_counts() {
    let state = make_state(AccessPolicy::default()).await;
    let token = token_for(&state, "admin@example.com", Role::Admin).await;
    let admin = state.store.list_profiles().await.unwrap()[0].id;
    state.store.add_favorite(admin, "orca").await.unwrap();
    state.store.create_resource(resource("r1")).await.unwrap();

    let (status, body) =
      oneshot(state, "GET", "/api/admin/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userCount"], 1);
    assert_eq!(body["favoriteCount"], 1);
    assert_eq!(body["resourceCount"], 1);
  }

  // ── Diagnostic ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn diagnostic_report_needs_no_auth() {
    let state = make_state(AccessPolicy::default()).await;
    token_for(&state, "user@example.com", Role::User).await;

    let (status, body) =
      oneshot(state, "GET", "/api/diagnostic", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["connection"]["ok"], true);
    assert_eq!(body["auth"]["ok"], true);
    assert_eq!(body["security"]["ok"], true);
    assert_eq!(body["tables"]["accounts"]["count"], 1);
    assert_eq!(body["summary"]["healthyTables"], 4);
    assert_eq!(body["summary"]["errors"].as_array().unwrap().len(), 0);
  }

  #[tokio::test]
  async fn diagnostic_sample_returns_rows_and_columns() {
    let state = make_state(AccessPolicy::default()).await;
    state.store.create_resource(resource("r1")).await.unwrap();

    let (status, body) = oneshot(
      state,
      "POST",
      "/api/diagnostic",
      None,
      Some(json!({ "table": "resources" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["rows"][0]["id"], "r1");
    assert!(
      body["columns"]
        .as_array()
        .unwrap()
        .contains(&json!("image_url"))
    );
  }

  #[tokio::test]
  async fn diagnostic_sample_without_table_returns_400() {
    let state = make_state(AccessPolicy::default()).await;
    for body in [json!({}), json!({ "table": "" })] {
      let (status, resp) =
        oneshot(state.clone(), "POST", "/api/diagnostic", None, Some(body))
          .await;
      assert_eq!(status, StatusCode::BAD_REQUEST);
      assert!(resp["error"].is_string());
    }
  }

  #[tokio::test]
  async fn diagnostic_sample_of_unknown_table_is_a_store_error() {
    let state = make_state(AccessPolicy::default()).await;
    let (status, body) = oneshot(
      state,
      "POST",
      "/api/diagnostic",
      None,
      Some(json!({ "table": "secrets" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
  }
}
