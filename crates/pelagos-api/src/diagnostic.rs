//! Handlers for `/api/diagnostic` — the store health probe.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/api/diagnostic` | Full health report, no auth |
//! | `POST` | `/api/diagnostic` | Body: `{"table": "accounts"}` — sample rows |
//!
//! The GET report is deliberately reachable without credentials: it exists
//! to debug broken deployments, including ones where auth itself is the
//! broken part.

use std::{collections::BTreeMap, time::Instant};

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use pelagos_core::store::{DataStore, TableSample};

use crate::{
  AppState,
  error::{ApiError, ApiJson},
};

const SAMPLE_LIMIT: u32 = 5;

// ─── Report shape ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionReport {
  pub ok:         bool,
  pub latency_ms: u64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error:      Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthReport {
  pub ok:          bool,
  pub has_session: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error:       Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableReport {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub count: Option<u64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityReport {
  /// Whether a row-level read of the accounts table succeeds.
  pub ok:    bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
  pub total_rows:     u64,
  pub table_count:    usize,
  pub healthy_tables: usize,
  pub errors:         Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport {
  pub connection: ConnectionReport,
  pub auth:       AuthReport,
  pub tables:     BTreeMap<String, TableReport>,
  pub security:   SecurityReport,
  pub summary:    Summary,
}

// ─── GET ──────────────────────────────────────────────────────────────────────

/// `GET /api/diagnostic`
pub async fn report<S>(
  State(state): State<AppState<S>>,
) -> Json<DiagnosticReport>
where
  S: DataStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let table_names = state.store.table_names();

  // Connection probe: time one trivial count.
  let started = Instant::now();
  let connection = match state.store.table_count("accounts").await {
    Ok(_) => ConnectionReport {
      ok:         true,
      latency_ms: started.elapsed().as_millis() as u64,
      error:      None,
    },
    Err(e) => ConnectionReport {
      ok:         false,
      latency_ms: started.elapsed().as_millis() as u64,
      error:      Some(e.to_string()),
    },
  };

  let auth = match state.store.current_session().await {
    Ok(session) => AuthReport {
      ok:          true,
      has_session: session.is_some(),
      error:       None,
    },
    Err(e) => AuthReport {
      ok:          false,
      has_session: false,
      error:       Some(e.to_string()),
    },
  };

  let mut tables = BTreeMap::new();
  let mut total_rows = 0;
  let mut healthy_tables = 0;
  let mut errors = Vec::new();
  for table in &table_names {
    let report = match state.store.table_count(table).await {
      Ok(count) => {
        total_rows += count;
        healthy_tables += 1;
        TableReport { count: Some(count), error: None }
      }
      Err(e) => {
        errors.push(format!("{table}: {e}"));
        TableReport { count: None, error: Some(e.to_string()) }
      }
    };
    tables.insert(table.clone(), report);
  }

  let security = match state.store.table_sample("accounts", 1).await {
    Ok(_) => SecurityReport { ok: true, error: None },
    Err(e) => SecurityReport {
      ok:    false,
      error: Some(e.to_string()),
    },
  };

  if !connection.ok {
    tracing::warn!("diagnostic probe: store connection failing");
  }

  Json(DiagnosticReport {
    connection,
    auth,
    security,
    summary: Summary {
      total_rows,
      table_count: table_names.len(),
      healthy_tables,
      errors,
    },
    tables,
  })
}

// ─── POST ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SampleBody {
  pub table: Option<String>,
}

/// `POST /api/diagnostic` — body: `{"table": "<name>"}`
pub async fn sample<S>(
  State(state): State<AppState<S>>,
  ApiJson(body): ApiJson<SampleBody>,
) -> Result<Json<TableSample>, ApiError>
where
  S: DataStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let table = body
    .table
    .as_deref()
    .filter(|t| !t.is_empty())
    .ok_or_else(|| ApiError::BadRequest("table is required".to_string()))?;

  let sample = state
    .store
    .table_sample(table, SAMPLE_LIMIT)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(sample))
}
