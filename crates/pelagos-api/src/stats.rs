//! Handler for `GET /api/admin/stats` — dashboard headline counts.

use axum::{Json, extract::State};
use serde::Serialize;

use pelagos_core::store::DataStore;

use crate::{AppState, auth::AdminUser, error::ApiError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
  pub user_count:     u64,
  pub favorite_count: u64,
  pub resource_count: u64,
}

/// `GET /api/admin/stats`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  _admin: AdminUser,
) -> Result<Json<Stats>, ApiError>
where
  S: DataStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let user_count = state
    .store
    .table_count("accounts")
    .await
    .map_err(ApiError::store)?;
  let favorite_count = state
    .store
    .table_count("favorites")
    .await
    .map_err(ApiError::store)?;
  let resource_count = state
    .store
    .table_count("resources")
    .await
    .map_err(ApiError::store)?;

  Ok(Json(Stats {
    user_count,
    favorite_count,
    resource_count,
  }))
}
