use steward_core::kv::{KeyValueStore, LOCALE_KEY};

use crate::{Catalog, Locale, Params};

/// Active locale plus the catalog it resolves against.
///
/// Locale changes are persisted under [`LOCALE_KEY`] and take effect for the
/// very next [`Localizer::resolve`] call.
pub struct Localizer<S> {
  catalog: Catalog,
  store:   S,
  locale:  Locale,
}

impl<S: KeyValueStore> Localizer<S> {
  /// Starts at the catalog's default locale; call
  /// [`Self::restore_locale`] to pick up a saved choice.
  pub fn new(catalog: Catalog, store: S) -> Self {
    let locale = catalog.default_locale();
    Self { catalog, store, locale }
  }

  /// Apply the persisted locale if it names one the catalog holds.
  /// Anything else leaves the current locale in place.
  pub fn restore_locale(&mut self) -> Locale {
    match self.store.get(LOCALE_KEY) {
      Ok(Some(code)) => match Locale::parse(&code) {
        Ok(locale) if self.catalog.supports(locale) => self.locale = locale,
        Ok(locale) => tracing::warn!(%locale, "saved locale has no dictionary"),
        Err(e) => tracing::warn!(error = %e, "ignoring saved locale"),
      },
      Ok(None) => {}
      Err(e) => tracing::warn!(error = %e, "failed to read saved locale"),
    }
    self.locale
  }

  pub fn locale(&self) -> Locale { self.locale }

  pub fn catalog(&self) -> &Catalog { &self.catalog }

  pub fn set_locale(&mut self, locale: Locale) {
    self.locale = locale;
    if let Err(e) = self.store.set(LOCALE_KEY, locale.code()) {
      tracing::warn!(error = %e, "failed to persist locale");
    }
    tracing::debug!(%locale, "locale changed");
  }

  /// Advance to the next configured locale, wrapping around.
  pub fn toggle_locale(&mut self) -> Locale {
    let next = self.catalog.next_locale(self.locale);
    self.set_locale(next);
    next
  }

  pub fn resolve(&self, key: &str, params: Option<&Params>) -> String {
    self.catalog.resolve(self.locale, key, params)
  }

  /// [`Self::resolve`] without parameters.
  pub fn t(&self, key: &str) -> String { self.resolve(key, None) }
}
