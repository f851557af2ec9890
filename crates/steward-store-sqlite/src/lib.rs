//! SQLite backend for the Steward key-value store.
//!
//! A single file holds the flat key namespace, so session and locale state
//! outlive the process that wrote them.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteKv;
