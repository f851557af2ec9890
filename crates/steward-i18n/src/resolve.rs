//! Key resolution: dictionary walk with fallback, then interpolation.
//!
//! Resolution order for a dotted key:
//!
//! 1. walk the active locale's dictionary;
//! 2. on any miss, walk the default locale's dictionary with the full path;
//! 3. on a second miss, use the key itself.
//!
//! The resolved node is stringified, then either the reserved `fallback`
//! parameter is applied or the remaining parameters are interpolated. The two
//! modes never combine in one call.

use crate::{Locale, catalog::Catalog, dict::DictNode};

/// Parameter name reserved for the "text when the key is missing" mode.
pub const FALLBACK_PARAM: &str = "fallback";

/// Parameters for one resolution call, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
  entries: Vec<(String, String)>,
}

impl Params {
  pub fn new() -> Self { Self::default() }

  /// Params in fallback mode: `text` is returned when the key resolves
  /// nowhere.
  pub fn fallback(text: impl Into<String>) -> Self {
    Self::new().with(FALLBACK_PARAM, text)
  }

  /// Add a `{name}` substitution. Re-using a name replaces its value in
  /// place.
  pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    let name = name.into();
    let value = value.into();
    match self.entries.iter_mut().find(|(n, _)| *n == name) {
      Some(entry) => entry.1 = value,
      None => self.entries.push((name, value)),
    }
    self
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self
      .entries
      .iter()
      .find(|(n, _)| n == name)
      .map(|(_, v)| v.as_str())
  }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
  }
}

impl<N, V> FromIterator<(N, V)> for Params
where
  N: Into<String>,
  V: Into<String>,
{
  fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
    iter.into_iter().fold(Self::new(), |p, (n, v)| p.with(n, v))
  }
}

/// Resolve `key` for `locale` against `catalog`. Pure; never fails.
pub fn resolve(
  catalog: &Catalog,
  locale: Locale,
  key: &str,
  params: Option<&Params>,
) -> String {
  let resolved = lookup(catalog, locale, key).unwrap_or_else(|| key.to_owned());

  let Some(params) = params else {
    return resolved;
  };

  if let Some(fallback) = params.get(FALLBACK_PARAM) {
    if resolved == key && !fallback.is_empty() {
      return fallback.to_owned();
    }
    return resolved;
  }

  // Plain literal substitution, in insertion order. Values are inserted
  // verbatim, so a value containing `{other}` is itself substituted if
  // `other` comes later.
  params.iter().fold(resolved, |text, (name, value)| {
    text.replace(&format!("{{{name}}}"), value)
  })
}

fn lookup(catalog: &Catalog, locale: Locale, key: &str) -> Option<String> {
  // An empty key would otherwise name the whole dictionary.
  if key.is_empty() {
    return None;
  }

  if let Some(node) = walk(catalog.dictionary(locale), key) {
    return Some(node.to_string());
  }

  // Only the default-locale fallback treats an empty leaf as missing.
  walk(catalog.dictionary(catalog.default_locale()), key)
    .map(DictNode::to_string)
    .filter(|text| !text.is_empty())
}

fn walk<'d>(dict: Option<&'d DictNode>, key: &str) -> Option<&'d DictNode> {
  match dict?.walk(key.split('.')) {
    Ok(node) => Some(node),
    Err(miss) => {
      tracing::trace!(key, ?miss, "dictionary miss");
      None
    }
  }
}
