//! Handlers for `/api/admin/users`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/api/admin/users` | All accounts, newest first |
//! | `PUT`  | `/api/admin/users` | Body: `{"id": …, "name"?, "role"?, "is_banned"?}` |

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pelagos_core::{
  identity::Role,
  store::{AdminUserUpdate, DataStore, ProfileRow},
};

use crate::{
  AppState,
  auth::AdminUser,
  error::{ApiError, ApiJson},
};

/// The `{"data": …}` envelope successful admin responses use.
#[derive(Debug, Serialize)]
pub struct Data<T> {
  pub data: T,
}

/// `GET /api/admin/users`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  _admin: AdminUser,
) -> Result<Json<Data<Vec<ProfileRow>>>, ApiError>
where
  S: DataStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let profiles = state
    .store
    .list_profiles()
    .await
    .map_err(ApiError::store)?;
  Ok(Json(Data { data: profiles }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub id:        Uuid,
  /// New display name; the wire field is `name`.
  pub name:      Option<String>,
  pub role:      Option<Role>,
  pub is_banned: Option<bool>,
}

/// `PUT /api/admin/users` — apply an administrative update to one account.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  admin: AdminUser,
  ApiJson(body): ApiJson<UpdateBody>,
) -> Result<Json<Data<ProfileRow>>, ApiError>
where
  S: DataStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  tracing::info!(
    admin = %admin.0.id,
    target = %body.id,
    "admin user update"
  );
  let update = AdminUserUpdate {
    display_name: body.name,
    role:         body.role,
    is_banned:    body.is_banned,
  };
  let profile = state
    .store
    .update_profile(body.id, update)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("user {} not found", body.id)))?;
  Ok(Json(Data { data: profile }))
}
