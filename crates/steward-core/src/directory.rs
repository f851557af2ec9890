//! The identity directory consulted at login.
//!
//! The session only needs the [`IdentityDirectory`] shape: a lookup from
//! identifier to principal plus a shared-secret check. [`MockDirectory`] is
//! the fixed, in-memory directory the console ships with.

use chrono::NaiveDate;

use crate::principal::{AccountStatus, Principal, Role};

/// The secret accepted by [`MockDirectory::default`].
pub const DEFAULT_SHARED_SECRET: &str = "password";

pub trait IdentityDirectory {
  /// Find the principal registered under `identifier` (an email address).
  fn lookup(&self, identifier: &str) -> Option<Principal>;

  /// Check `secret` against the directory's configured shared secret.
  fn verify_secret(&self, secret: &str) -> bool;
}

/// A fixed directory of known principals sharing one secret.
#[derive(Debug, Clone)]
pub struct MockDirectory {
  principals:    Vec<Principal>,
  shared_secret: String,
}

impl MockDirectory {
  /// The seeded admin, manager and viewer accounts, accepting
  /// `shared_secret`.
  pub fn new(shared_secret: impl Into<String>) -> Self {
    Self::with_principals(seed_principals(), shared_secret)
  }

  pub fn with_principals(
    principals: Vec<Principal>,
    shared_secret: impl Into<String>,
  ) -> Self {
    Self { principals, shared_secret: shared_secret.into() }
  }

  pub fn principals(&self) -> &[Principal] { &self.principals }
}

impl Default for MockDirectory {
  fn default() -> Self { Self::new(DEFAULT_SHARED_SECRET) }
}

impl IdentityDirectory for MockDirectory {
  fn lookup(&self, identifier: &str) -> Option<Principal> {
    self.principals.iter().find(|p| p.email == identifier).cloned()
  }

  fn verify_secret(&self, secret: &str) -> bool { secret == self.shared_secret }
}

fn seed_principals() -> Vec<Principal> {
  let created_at = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
  let seed = |id: &str, name: &str, email: &str, role: Role| Principal {
    id: id.to_owned(),
    name: name.to_owned(),
    email: email.to_owned(),
    role,
    status: AccountStatus::Active,
    avatar: None,
    created_at,
    last_login: None,
  };

  vec![
    seed("1", "Admin User", "admin@example.com", Role::Admin),
    seed("2", "Manager User", "manager@example.com", Role::Manager),
    seed("3", "Viewer User", "viewer@example.com", Role::Viewer),
  ]
}
