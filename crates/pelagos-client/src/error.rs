//! Error type for `pelagos-client`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A toggle for the same control is already in flight.
  #[error("operation already in flight")]
  Busy,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
