//! Client-side core for Pelagos.
//!
//! Owns the pieces of the platform where concurrent state actually matters:
//! the session state machine, the admin access gate, the favorites
//! coordinator, and the realtime resource mirror. Everything here is
//! generic over [`pelagos_core::store::DataStore`]; the presentation layer
//! renders these states but never talks to the store directly.

pub mod error;
pub mod fallback;
pub mod favorites;
pub mod gate;
pub mod mirror;
pub mod session;

pub use error::{Error, Result};

#[cfg(test)]
mod testing;
