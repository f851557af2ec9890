//! Core types for the Steward admin console: principals and roles, session
//! state, and the access gate every protected view consults.
//!
//! This crate performs no I/O of its own. Identity lookup and persistence are
//! reached through the [`directory::IdentityDirectory`] and
//! [`kv::KeyValueStore`] traits; concrete backends live in other crates
//! (e.g. `steward-store-sqlite`).

pub mod access;
pub mod directory;
pub mod error;
pub mod kv;
pub mod principal;
pub mod session;

pub use error::{AuthFailure, Error, Result};
