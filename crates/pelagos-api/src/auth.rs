//! Bearer-token extractor for admin routes.
//!
//! Resolves the `Authorization: Bearer <token>` header to a store session
//! and runs the same admission check the client-side gate uses: an `admin`
//! metadata role, or membership in the shared allow-list. Missing or
//! unknown tokens are `401`; a valid session without admission is `403`.

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};

use pelagos_core::{
  identity::Identity,
  policy::admin_admitted,
  store::DataStore,
};

use crate::{AppState, error::ApiError};

/// Present in a handler's arguments means the caller is an admitted admin.
pub struct AdminUser(pub Identity);

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
  headers
    .get(header::AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Bearer ")
}

impl<S> FromRequestParts<AppState<S>> for AdminUser
where
  S: DataStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token =
      bearer_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
    let session = state
      .store
      .session_for_token(token)
      .await
      .map_err(ApiError::store)?
      .ok_or(ApiError::Unauthorized)?;

    if !admin_admitted(&state.policy, &session.user) {
      tracing::debug!(
        user_id = %session.user.id,
        "admin route refused for non-admitted user"
      );
      return Err(ApiError::Forbidden);
    }
    Ok(AdminUser(session.user))
  }
}
