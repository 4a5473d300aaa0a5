//! Error type for `pelagos-store-sqlite`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] pelagos_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("password hash error: {0}")]
  PasswordHash(String),

  #[error("email already registered: {0}")]
  EmailTaken(String),

  #[error("invalid credentials")]
  InvalidCredentials,

  #[error("account not found: {0}")]
  AccountNotFound(Uuid),

  #[error("resource not found: {0}")]
  ResourceNotFound(String),

  #[error("unknown table: {0:?}")]
  UnknownTable(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
