//! SQLite backend for the Pelagos data store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Change feeds (auth events, resource
//! change notices) are delivered over in-process broadcast channels, playing
//! the role the hosted store's push channels play in production.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
