//! [`Console`] — session and localizer wired to one store.

use std::rc::Rc;

use anyhow::Context as _;
use steward_core::{
  AuthFailure,
  access::{Gated, NavPolicy, Route},
  directory::MockDirectory,
  kv::KeyValueStore,
  session::Session,
};
use steward_i18n::{
  Catalog, Locale, Localizer, Params,
  format::{Currency, format_currency},
};
use steward_store_sqlite::SqliteKv;

use crate::{config::ConsoleConfig, render};

pub struct Console<S> {
  session:    Session<MockDirectory, Rc<S>>,
  l10n:       Localizer<Rc<S>>,
  nav_policy: NavPolicy,
}

impl Console<SqliteKv> {
  /// Open the configured store and restore the previous session and locale.
  pub fn open(cfg: &ConsoleConfig) -> anyhow::Result<Self> {
    let store = SqliteKv::open(&cfg.store_path)
      .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;
    let catalog = Catalog::bundled().context("failed to load bundled dictionaries")?;
    let directory = MockDirectory::new(cfg.shared_secret.clone());
    Ok(Self::new(directory, store, catalog, cfg.nav_policy))
  }
}

impl<S: KeyValueStore> Console<S> {
  pub fn new(
    directory: MockDirectory,
    store: S,
    catalog: Catalog,
    nav_policy: NavPolicy,
  ) -> Self {
    let store = Rc::new(store);
    let mut session = Session::new(directory, Rc::clone(&store));
    let mut l10n = Localizer::new(catalog, store);
    session.restore_session();
    l10n.restore_locale();
    Self { session, l10n, nav_policy }
  }

  // ── Session ─────────────────────────────────────────────────────────────

  pub fn login(&mut self, email: &str, password: &str) -> Result<String, String> {
    match self.session.authenticate(email, password) {
      Ok(principal) => Ok(render::principal_line(&self.l10n, &principal)),
      Err(AuthFailure::NotFound | AuthFailure::BadSecret) => {
        Err(self.l10n.t("auth.loginFailed"))
      }
    }
  }

  pub fn logout(&mut self) -> String {
    self.session.end_session();
    self.l10n.t("auth.loggedOut")
  }

  pub fn whoami(&self) -> String {
    match self.session.current_principal() {
      Some(principal) => render::principal_line(&self.l10n, principal),
      None => self.l10n.t("auth.notLoggedIn"),
    }
  }

  /// One line per navigable route: path, then localized label.
  pub fn nav(&self) -> String {
    self
      .session
      .navigation(self.nav_policy)
      .into_iter()
      .map(|route| format!("{:<12}{}", route.path(), self.l10n.t(route.nav_key())))
      .collect::<Vec<_>>()
      .join("\n")
  }

  /// Render `route` through the access gate.
  pub fn open_route(&self, route: Route) -> String {
    let required = route.required_roles();
    let gated = self
      .session
      .guard(&required, |principal| render::page(&self.l10n, route, principal));
    match gated {
      Gated::Rendered(page) => page,
      Gated::Denied(decision) => {
        render::gate_panel(&self.l10n, &decision).unwrap_or_default()
      }
    }
  }

  // ── Locale ──────────────────────────────────────────────────────────────

  pub fn locale(&self) -> Locale { self.l10n.locale() }

  pub fn show_locale(&self) -> String {
    let params = Params::new().with("language", self.language_label());
    self.l10n.resolve("settings.language", Some(&params))
  }

  pub fn set_locale(&mut self, locale: Locale) -> String {
    self.l10n.set_locale(locale);
    self.locale_changed()
  }

  pub fn toggle_locale(&mut self) -> String {
    self.l10n.toggle_locale();
    self.locale_changed()
  }

  fn locale_changed(&self) -> String {
    let params = Params::new().with("language", self.language_label());
    self.l10n.resolve("settings.languageChanged", Some(&params))
  }

  fn language_label(&self) -> String { self.l10n.locale().code().to_uppercase() }

  // ── Strings ─────────────────────────────────────────────────────────────

  pub fn translate(&self, key: &str, params: &Params) -> String {
    let params = (!params.is_empty()).then_some(params);
    self.l10n.resolve(key, params)
  }

  /// Coverage summary and whether the catalog is consistent.
  pub fn check_locales(&self) -> (String, bool) {
    let report = self.l10n.catalog().coverage();
    let mut lines = Vec::new();
    for entry in &report.locales {
      lines.push(format!(
        "{}: {} missing from {}, {} untranslated",
        entry.locale,
        entry.missing_from_default.len(),
        report.default_locale,
        entry.untranslated.len(),
      ));
      lines.extend(entry.missing_from_default.iter().map(|k| format!("  ! {k}")));
      lines.extend(entry.untranslated.iter().map(|k| format!("  - {k}")));
    }
    (lines.join("\n"), report.is_consistent())
  }

  /// Format `amount` in `currency`, or the active locale's currency.
  pub fn price(&self, amount: f64, currency: Option<Currency>) -> String {
    let currency = currency.unwrap_or_else(|| Currency::for_locale(self.locale()));
    format_currency(amount, currency)
  }
}
