//! Error types for `steward-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown route: {0:?}")]
  UnknownRoute(String),

  #[error("corrupt session data: {0}")]
  CorruptSessionData(#[source] serde_json::Error),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

/// Why [`Session::authenticate`](crate::session::Session::authenticate)
/// rejected a login attempt.
///
/// Both variants render the same message so callers that surface the error
/// to a user do not leak which identifiers exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
  #[error("invalid email or password")]
  NotFound,

  #[error("invalid email or password")]
  BadSecret,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
