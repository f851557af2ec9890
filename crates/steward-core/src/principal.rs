//! Principal — the authenticated subject of a session — and its role.

use std::{collections::BTreeSet, fmt};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator as _};

// ─── Role ────────────────────────────────────────────────────────────────────

/// The closed set of roles a principal can hold. Exactly one per principal.
///
/// The derived ordering exists only so roles can live in a [`RoleSet`];
/// authorization never compares roles by rank.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
  Admin,
  Manager,
  Viewer,
}

impl Role {
  /// Dictionary key of the role's display label.
  pub fn label_key(self) -> &'static str {
    match self {
      Self::Admin => "users.admin",
      Self::Manager => "users.manager",
      Self::Viewer => "users.viewer",
    }
  }
}

// ─── Role sets ───────────────────────────────────────────────────────────────

/// An explicit set of roles, checked by membership.
///
/// An empty set places no restriction on authenticated principals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
  pub fn empty() -> Self { Self::default() }

  /// Every role in the closed set.
  pub fn all() -> Self { Role::iter().collect() }

  pub fn contains(&self, role: Role) -> bool { self.0.contains(&role) }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  /// Whether a principal holding `role` passes this requirement.
  pub fn admits(&self, role: Role) -> bool {
    self.is_empty() || self.contains(role)
  }

  pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
    self.0.iter().copied()
  }
}

impl FromIterator<Role> for RoleSet {
  fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
  fn from(roles: [Role; N]) -> Self { roles.into_iter().collect() }
}

impl fmt::Display for RoleSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, role) in self.iter().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      write!(f, "{role}")?;
    }
    Ok(())
  }
}

// ─── Principal ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
  #[default]
  Active,
  Inactive,
}

impl AccountStatus {
  pub fn label_key(self) -> &'static str {
    match self {
      Self::Active => "users.active",
      Self::Inactive => "users.inactive",
    }
  }
}

/// The identity bound to the active session.
///
/// Serialised with camelCase field names; this is the layout written to the
/// session entry of the key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
  pub id:         String,
  pub name:       String,
  /// Unique; the identifier used for login lookup.
  pub email:      String,
  pub role:       Role,
  pub status:     AccountStatus,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub avatar:     Option<String>,
  /// Informational only. Read from either a bare date or a full timestamp.
  #[serde(deserialize_with = "date_or_timestamp")]
  pub created_at: NaiveDate,
  /// Informational only. Stamped by the session on each successful login;
  /// an unreadable stored value is dropped rather than rejected.
  #[serde(
    default,
    deserialize_with = "lenient_instant",
    skip_serializing_if = "Option::is_none"
  )]
  pub last_login: Option<DateTime<Utc>>,
}

// ─── Timestamp parsing ───────────────────────────────────────────────────────

fn date_or_timestamp<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> Result<NaiveDate, D::Error> {
  let raw = String::deserialize(deserializer)?;
  raw
    .parse::<NaiveDate>()
    .or_else(|_| DateTime::parse_from_rfc3339(&raw).map(|dt| dt.date_naive()))
    .or_else(|_| raw.parse::<NaiveDateTime>().map(|dt| dt.date()))
    .map_err(serde::de::Error::custom)
}

fn lenient_instant<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
  let raw = Option::<String>::deserialize(deserializer)?;
  Ok(raw.and_then(|s| match DateTime::parse_from_rfc3339(&s) {
    Ok(dt) => Some(dt.with_timezone(&Utc)),
    Err(e) => {
      tracing::debug!(value = %s, error = %e, "dropping unreadable lastLogin");
      None
    }
  }))
}
