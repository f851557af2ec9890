//! Error type for `steward-i18n`.
//!
//! Only catalog construction can fail. Key resolution has no error path.

use thiserror::Error;

use crate::Locale;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid {locale} dictionary: {source}")]
  Dictionary {
    locale: Locale,
    #[source]
    source: serde_json::Error,
  },

  #[error("a catalog needs at least one dictionary")]
  EmptyCatalog,

  #[error("duplicate dictionary for locale {0}")]
  DuplicateLocale(Locale),

  #[error("unsupported locale: {0:?}")]
  UnsupportedLocale(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
