//! [`Catalog`] — the set of locale dictionaries, in configured order.
//!
//! The first dictionary belongs to the default locale. Every key defined in
//! another locale is expected to exist in the default one as well; a
//! [`CoverageReport`] lists the keys that break this, and construction logs
//! them without failing.

use std::collections::BTreeSet;

use crate::{
  Error, Locale, Result,
  dict::DictNode,
  resolve::{self, Params},
};

const BUNDLED_EN: &str = include_str!("../locales/en.json");
const BUNDLED_JP: &str = include_str!("../locales/jp.json");

#[derive(Debug, Clone)]
pub struct Catalog {
  dictionaries: Vec<(Locale, DictNode)>,
}

impl Catalog {
  /// Build a catalog from `(locale, dictionary)` pairs; the first pair names
  /// the default locale.
  pub fn new<I>(dictionaries: I) -> Result<Self>
  where
    I: IntoIterator<Item = (Locale, DictNode)>,
  {
    let mut seen = BTreeSet::new();
    let mut entries = Vec::new();
    for (locale, dict) in dictionaries {
      if !seen.insert(locale.code()) {
        return Err(Error::DuplicateLocale(locale));
      }
      entries.push((locale, dict));
    }
    if entries.is_empty() {
      return Err(Error::EmptyCatalog);
    }

    let catalog = Self { dictionaries: entries };
    catalog.log_coverage();
    Ok(catalog)
  }

  /// Parse one JSON document per locale.
  pub fn from_json<'a, I>(sources: I) -> Result<Self>
  where
    I: IntoIterator<Item = (Locale, &'a str)>,
  {
    let dictionaries = sources
      .into_iter()
      .map(|(locale, json)| {
        serde_json::from_str(json)
          .map(|dict| (locale, dict))
          .map_err(|source| Error::Dictionary { locale, source })
      })
      .collect::<Result<Vec<_>>>()?;
    Self::new(dictionaries)
  }

  /// The English and Japanese dictionaries compiled into the crate.
  pub fn bundled() -> Result<Self> {
    Self::from_json([(Locale::En, BUNDLED_EN), (Locale::Jp, BUNDLED_JP)])
  }

  pub fn default_locale(&self) -> Locale { self.dictionaries[0].0 }

  pub fn locales(&self) -> impl Iterator<Item = Locale> + '_ {
    self.dictionaries.iter().map(|(locale, _)| *locale)
  }

  pub fn supports(&self, locale: Locale) -> bool {
    self.dictionary(locale).is_some()
  }

  pub fn dictionary(&self, locale: Locale) -> Option<&DictNode> {
    self
      .dictionaries
      .iter()
      .find(|(l, _)| *l == locale)
      .map(|(_, dict)| dict)
  }

  /// The locale after `current` in configured order, wrapping around. A
  /// locale the catalog does not hold advances to the default.
  pub fn next_locale(&self, current: Locale) -> Locale {
    let locales: Vec<Locale> = self.locales().collect();
    match locales.iter().position(|l| *l == current) {
      Some(i) => locales[(i + 1) % locales.len()],
      None => self.default_locale(),
    }
  }

  /// See [`resolve::resolve`].
  pub fn resolve(&self, locale: Locale, key: &str, params: Option<&Params>) -> String {
    resolve::resolve(self, locale, key, params)
  }

  // ── Coverage ────────────────────────────────────────────────────────────

  pub fn coverage(&self) -> CoverageReport {
    let default_locale = self.default_locale();
    let default_keys: BTreeSet<String> =
      self.dictionaries[0].1.leaf_keys().into_iter().collect();

    let locales = self.dictionaries[1..]
      .iter()
      .map(|(locale, dict)| {
        let keys: BTreeSet<String> = dict.leaf_keys().into_iter().collect();
        LocaleCoverage {
          locale:               *locale,
          missing_from_default: keys.difference(&default_keys).cloned().collect(),
          untranslated:         default_keys.difference(&keys).cloned().collect(),
        }
      })
      .collect();

    CoverageReport { default_locale, locales }
  }

  fn log_coverage(&self) {
    for entry in self.coverage().locales {
      if !entry.missing_from_default.is_empty() {
        tracing::warn!(
          locale = %entry.locale,
          keys = ?entry.missing_from_default,
          "keys missing from the default locale"
        );
      }
      if !entry.untranslated.is_empty() {
        tracing::debug!(
          locale = %entry.locale,
          count = entry.untranslated.len(),
          "untranslated keys fall back to the default locale"
        );
      }
    }
  }
}

/// Key coverage of every non-default locale against the default one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
  pub default_locale: Locale,
  pub locales:        Vec<LocaleCoverage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleCoverage {
  pub locale:               Locale,
  /// Keys this locale defines that the default locale does not. Each one
  /// resolves to the bare key whenever another locale is active.
  pub missing_from_default: Vec<String>,
  /// Default-locale keys this locale lacks; they resolve to default text.
  pub untranslated:         Vec<String>,
}

impl CoverageReport {
  /// No locale defines a key the default locale lacks.
  pub fn is_consistent(&self) -> bool {
    self.locales.iter().all(|l| l.missing_from_default.is_empty())
  }

  /// Consistent, and every locale translates every default key.
  pub fn is_complete(&self) -> bool {
    self.is_consistent() && self.locales.iter().all(|l| l.untranslated.is_empty())
  }
}
