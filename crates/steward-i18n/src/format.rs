//! Currency formatting for the two console locales.

use strum::{Display, EnumString};

use crate::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Currency {
  #[default]
  Usd,
  Jpy,
}

impl Currency {
  pub fn code(self) -> &'static str {
    match self {
      Self::Usd => "USD",
      Self::Jpy => "JPY",
    }
  }

  pub fn symbol(self) -> &'static str {
    match self {
      Self::Usd => "$",
      Self::Jpy => "¥",
    }
  }

  pub fn fraction_digits(self) -> usize {
    match self {
      Self::Usd => 2,
      Self::Jpy => 0,
    }
  }

  /// The currency amounts are shown in for `locale`.
  pub fn for_locale(locale: Locale) -> Self {
    match locale {
      Locale::En => Self::Usd,
      Locale::Jp => Self::Jpy,
    }
  }
}

/// `$1,234.56`, `¥1,234`, `-$1,234.56`.
pub fn format_currency(amount: f64, currency: Currency) -> String {
  let sign = if amount < 0.0 { "-" } else { "" };
  let number = format_grouped(amount.abs(), currency.fraction_digits());
  format!("{sign}{}{number}", currency.symbol())
}

/// Symbol followed by the absolute amount: two decimals, or for `¥` up to
/// three decimals with trailing zeros dropped.
pub fn format_simple_currency(amount: f64, symbol: &str) -> String {
  let number = if symbol == "¥" {
    let full = format_grouped(amount.abs(), 3);
    match full.split_once('.') {
      Some((int, frac)) => match frac.trim_end_matches('0') {
        "" => int.to_owned(),
        frac => format!("{int}.{frac}"),
      },
      None => full,
    }
  } else {
    format_grouped(amount.abs(), 2)
  };
  format!("{symbol}{number}")
}

/// Fixed-point with `,` thousands separators. `value` must be non-negative.
fn format_grouped(value: f64, decimals: usize) -> String {
  if value.is_nan() {
    return "NaN".to_owned();
  }
  if value.is_infinite() {
    return "∞".to_owned();
  }

  let fixed = format!("{value:.decimals$}");
  let (int, frac) = match fixed.split_once('.') {
    Some((int, frac)) => (int, Some(frac)),
    None => (fixed.as_str(), None),
  };

  let mut out = String::with_capacity(fixed.len() + int.len() / 3);
  for (i, digit) in int.chars().enumerate() {
    if i > 0 && (int.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(digit);
  }
  if let Some(frac) = frac {
    out.push('.');
    out.push_str(frac);
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn usd() {
    assert_eq!(format_currency(1234.56, Currency::Usd), "$1,234.56");
    assert_eq!(format_currency(0.0, Currency::Usd), "$0.00");
    assert_eq!(format_currency(999_999.99, Currency::Usd), "$999,999.99");
    assert_eq!(format_currency(1_234_567.89, Currency::Usd), "$1,234,567.89");
  }

  #[test]
  fn jpy() {
    assert_eq!(format_currency(1234.0, Currency::Jpy), "¥1,234");
    assert_eq!(format_currency(0.0, Currency::Jpy), "¥0");
    assert_eq!(format_currency(999_999.0, Currency::Jpy), "¥999,999");
    assert_eq!(format_currency(1_234_567.0, Currency::Jpy), "¥1,234,567");
  }

  #[test]
  fn negatives_carry_a_leading_sign() {
    assert_eq!(format_currency(-1234.56, Currency::Usd), "-$1,234.56");
    assert_eq!(format_currency(-1234.0, Currency::Jpy), "-¥1,234");
  }

  #[test]
  fn defaults_to_usd() {
    assert_eq!(format_currency(1234.56, Currency::default()), "$1,234.56");
  }

  #[test]
  fn currency_follows_locale_and_parses() {
    assert_eq!(Currency::for_locale(Locale::Jp), Currency::Jpy);
    assert_eq!("jpy".parse::<Currency>().unwrap(), Currency::Jpy);
    assert_eq!(Currency::Usd.code(), "USD");
  }

  #[test]
  fn simple_currency() {
    assert_eq!(format_simple_currency(-1234.5, "$"), "$1,234.50");
    assert_eq!(format_simple_currency(1234.0, "¥"), "¥1,234");
    assert_eq!(format_simple_currency(1234.5, "¥"), "¥1,234.5");
    assert_eq!(format_simple_currency(12.0, "€"), "€12.00");
  }

  #[test]
  fn short_numbers_are_not_grouped() {
    assert_eq!(format_currency(999.0, Currency::Jpy), "¥999");
    assert_eq!(format_currency(1000.0, Currency::Jpy), "¥1,000");
  }
}
