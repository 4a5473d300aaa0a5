//! Error types for `pelagos-core`.
//!
//! Store backends define their own richer error enums; this one covers
//! only the failures the core types themselves can produce.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown role discriminant: {0:?}")]
  UnknownRole(String),

  #[error("unknown resource category discriminant: {0:?}")]
  UnknownCategory(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
