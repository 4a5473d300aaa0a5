//! Core types and trait definitions for the Pelagos platform.
//!
//! Domain records, auth/resource events, the access policy, and the
//! [`store::DataStore`] abstraction. No HTTP or database dependencies;
//! every other crate in the workspace depends on this one.

pub mod error;
pub mod event;
pub mod identity;
pub mod policy;
pub mod resource;
pub mod store;

pub use error::{Error, Result};
