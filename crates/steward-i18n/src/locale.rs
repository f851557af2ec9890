use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::Error;

/// A supported UI language, identified by its two-letter code.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
  En,
  Jp,
}

impl Locale {
  /// Fallback locale for keys missing from the active dictionary.
  pub const DEFAULT: Self = Self::En;

  pub fn code(self) -> &'static str {
    match self {
      Self::En => "en",
      Self::Jp => "jp",
    }
  }

  /// Parse an exact two-letter code (`en`, `jp`).
  pub fn parse(code: &str) -> Result<Self, Error> {
    code
      .parse()
      .map_err(|_| Error::UnsupportedLocale(code.to_owned()))
  }
}

impl Default for Locale {
  fn default() -> Self { Self::DEFAULT }
}
