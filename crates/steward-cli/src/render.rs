//! Plain-text presentations for the terminal.

use steward_core::{
  access::{GateDecision, Route},
  kv::KeyValueStore,
  principal::Principal,
};
use steward_i18n::{Localizer, Params};

/// The fixed panel shown in place of a denied view; `None` when granted.
pub fn gate_panel<S: KeyValueStore>(
  l10n: &Localizer<S>,
  decision: &GateDecision,
) -> Option<String> {
  match decision {
    GateDecision::LoginRequired => Some(format!(
      "{}\n{}",
      l10n.t("access.deniedTitle"),
      l10n.t("access.loginPrompt"),
    )),
    GateDecision::InsufficientPermissions { required } => {
      let roles = Params::new().with("roles", required.to_string());
      Some(format!(
        "{}\n{}\n{}",
        l10n.t("access.insufficientTitle"),
        l10n.t("access.insufficientBody"),
        l10n.resolve("access.requiredRoles", Some(&roles)),
      ))
    }
    GateDecision::Granted => None,
  }
}

/// Header of a page the principal was allowed to open.
pub fn page<S: KeyValueStore>(
  l10n: &Localizer<S>,
  route: Route,
  principal: &Principal,
) -> String {
  let title = l10n.t(route.nav_key());
  match route {
    Route::Dashboard => format!(
      "{title}\n{}, {}!",
      l10n.t("dashboard.welcome"),
      principal.name
    ),
    _ => title,
  }
}

pub fn principal_line<S: KeyValueStore>(
  l10n: &Localizer<S>,
  principal: &Principal,
) -> String {
  let params = Params::new()
    .with("name", principal.name.as_str())
    .with("role", l10n.t(principal.role.label_key()));
  l10n.resolve("auth.loggedInAs", Some(&params))
}
