//! The access gate and the console's route table.
//!
//! [`evaluate`] is a pure function of the session state and a route's
//! required roles. It is re-evaluated on every render; nothing is cached
//! across session changes.

use std::str::FromStr;

use serde::Deserialize;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator as _};

use crate::{
  Error,
  principal::{Principal, Role, RoleSet},
};

// ─── Gate ────────────────────────────────────────────────────────────────────

/// Outcome of the access gate for one protected view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
  /// Nobody is logged in; show the login prompt. Takes precedence over any
  /// role requirement, including an empty one.
  LoginRequired,
  /// Logged in, but the principal's role is not in `required`.
  InsufficientPermissions { required: RoleSet },
  Granted,
}

impl GateDecision {
  pub fn is_granted(&self) -> bool { matches!(self, Self::Granted) }
}

/// A view that was either rendered or replaced by a denial panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gated<T> {
  Rendered(T),
  Denied(GateDecision),
}

pub fn evaluate(principal: Option<&Principal>, required: &RoleSet) -> GateDecision {
  match principal {
    None => GateDecision::LoginRequired,
    Some(p) if required.admits(p.role) => GateDecision::Granted,
    Some(_) => GateDecision::InsufficientPermissions { required: required.clone() },
  }
}

// ─── Routes ──────────────────────────────────────────────────────────────────

/// The console's pages. Role requirements are fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Route {
  Dashboard,
  Users,
  Analytics,
  Forms,
  Upload,
  Settings,
}

impl Route {
  pub fn path(self) -> &'static str {
    match self {
      Self::Dashboard => "/",
      Self::Users => "/users",
      Self::Analytics => "/analytics",
      Self::Forms => "/forms",
      Self::Upload => "/upload",
      Self::Settings => "/settings",
    }
  }

  /// Dictionary key of the route's navigation label.
  pub fn nav_key(self) -> &'static str {
    match self {
      Self::Dashboard => "navigation.dashboard",
      Self::Users => "navigation.users",
      Self::Analytics => "navigation.analytics",
      Self::Forms => "navigation.forms",
      Self::Upload => "navigation.upload",
      Self::Settings => "navigation.settings",
    }
  }

  pub fn required_roles(self) -> RoleSet {
    use Role::*;
    match self {
      Self::Dashboard | Self::Analytics | Self::Settings => {
        RoleSet::from([Admin, Manager, Viewer])
      }
      Self::Users | Self::Forms | Self::Upload => RoleSet::from([Admin, Manager]),
    }
  }

  pub fn from_path(path: &str) -> Option<Self> {
    Self::iter().find(|r| r.path() == path)
  }

  /// Accepts either a route name (`users`) or its path (`/users`).
  pub fn parse(input: &str) -> Result<Self, Error> {
    Self::from_path(input)
      .or_else(|| Self::from_str(input).ok())
      .ok_or_else(|| Error::UnknownRoute(input.to_owned()))
  }
}

// ─── Navigation ──────────────────────────────────────────────────────────────

/// How the navigation menu decides which routes to list.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NavPolicy {
  /// List exactly the routes the access gate would grant.
  #[default]
  Strict,
  /// The legacy menu filter: a route whose role list names `admin` is listed
  /// for everyone, a `manager` route for admins and managers, and a `viewer`
  /// route for any authenticated principal. Under the current route table
  /// this lists every route to every role, including routes the gate will
  /// then deny.
  AdminBypass,
}

/// Routes listed in the navigation menu. Nothing is listed when
/// unauthenticated.
pub fn visible_routes(principal: Option<&Principal>, policy: NavPolicy) -> Vec<Route> {
  let Some(principal) = principal else {
    return Vec::new();
  };
  let role = principal.role;

  Route::iter()
    .filter(|route| {
      let roles = route.required_roles();
      match policy {
        NavPolicy::Strict => roles.admits(role),
        NavPolicy::AdminBypass => {
          roles.contains(Role::Admin)
            || (roles.contains(Role::Manager)
              && matches!(role, Role::Admin | Role::Manager))
            || roles.contains(Role::Viewer)
        }
      }
    })
    .collect()
}
