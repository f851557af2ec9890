//! `steward` — command-line front end for the Steward admin console.
//!
//! Every invocation restores the persisted session and locale, runs one
//! command, and exits.
//!
//! # Usage
//!
//! ```text
//! steward login admin@example.com --password password
//! steward open users
//! steward locale toggle
//! steward t auth.loggedInAs --param name=Ann --param role=admin
//! ```

mod config;
mod console;
mod render;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use steward_core::access::Route;
use steward_i18n::{Locale, Params, format::Currency};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::{config::ConsoleConfig, console::Console};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "steward", version, about = "Steward admin console")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "steward.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Log in; prompts for the password when `--password` is absent.
  Login {
    email:    String,
    #[arg(long, env = "STEWARD_PASSWORD")]
    password: Option<String>,
  },
  /// End the current session.
  Logout,
  /// Show the logged-in principal.
  Whoami,
  /// List the routes the current principal can navigate to.
  Nav,
  /// Open a route (`users` or `/users`) through the access gate.
  Open { route: String },
  /// Show or change the interface language.
  Locale {
    #[command(subcommand)]
    action: Option<LocaleAction>,
  },
  /// Resolve a dictionary key in the active locale.
  #[command(name = "t")]
  Translate {
    key:      String,
    /// Placeholder substitution, `name=value`. Repeatable.
    #[arg(short, long = "param", value_parser = parse_param)]
    params:   Vec<(String, String)>,
    /// Text to show when the key resolves nowhere; disables substitution.
    #[arg(long)]
    fallback: Option<String>,
  },
  /// Report dictionary keys missing from the default locale.
  CheckLocales,
  /// Format an amount in the active locale's currency.
  Price {
    #[arg(allow_negative_numbers = true)]
    amount:   f64,
    #[arg(long)]
    currency: Option<Currency>,
  },
}

#[derive(Subcommand)]
enum LocaleAction {
  Show,
  Set { locale: Locale },
  Toggle,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
  raw
    .split_once('=')
    .map(|(name, value)| (name.to_owned(), value.to_owned()))
    .ok_or_else(|| format!("expected name=value, got {raw:?}"))
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = ConsoleConfig::load(&cli.config)?;
  let mut console = Console::open(&cfg)?;

  let output = match cli.command {
    Command::Login { email, password } => {
      let password = match password {
        Some(p) => p,
        None => read_password().context("failed to read password")?,
      };
      console.login(&email, &password).map_err(anyhow::Error::msg)?
    }
    Command::Logout => console.logout(),
    Command::Whoami => console.whoami(),
    Command::Nav => console.nav(),
    Command::Open { route } => console.open_route(Route::parse(&route)?),
    Command::Locale { action } => match action.unwrap_or(LocaleAction::Show) {
      LocaleAction::Show => console.show_locale(),
      LocaleAction::Set { locale } => console.set_locale(locale),
      LocaleAction::Toggle => console.toggle_locale(),
    },
    Command::Translate { key, params, fallback } => {
      let params = match fallback {
        Some(text) => Params::fallback(text),
        None => params.into_iter().collect(),
      };
      console.translate(&key, &params)
    }
    Command::CheckLocales => {
      let (summary, consistent) = console.check_locales();
      println!("{summary}");
      if !consistent {
        anyhow::bail!("some locales define keys the default locale lacks");
      }
      return Ok(());
    }
    Command::Price { amount, currency } => console.price(amount, currency),
  };

  if !output.is_empty() {
    println!("{output}");
  }
  Ok(())
}

/// Read a password from stdin.
fn read_password() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  eprint!("Password: ");
  io::stderr().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory as _;

  use super::*;

  #[test]
  fn cli_definition_is_valid() { Cli::command().debug_assert(); }

  #[test]
  fn params_split_on_first_equals() {
    assert_eq!(parse_param("a=b=c").unwrap(), ("a".into(), "b=c".into()));
    assert!(parse_param("novalue").is_err());
  }

  #[test]
  fn translate_with_fallback_parses() {
    let cli = Cli::try_parse_from(["steward", "t", "x.y", "--fallback", "X", "-p", "n=1"]).unwrap();
    match cli.command {
      Command::Translate { key, params, fallback } => {
        assert_eq!(key, "x.y");
        assert_eq!(params, vec![("n".to_string(), "1".to_string())]);
        assert_eq!(fallback.as_deref(), Some("X"));
      }
      _ => panic!("expected translate"),
    }
  }

  #[test]
  fn locale_and_price_values_parse() {
    let cli = Cli::try_parse_from(["steward", "locale", "set", "jp"]).unwrap();
    assert!(matches!(
      cli.command,
      Command::Locale { action: Some(LocaleAction::Set { locale: Locale::Jp }) }
    ));

    let cli = Cli::try_parse_from(["steward", "price", "-12.5", "--currency", "jpy"]).unwrap();
    assert!(matches!(
      cli.command,
      Command::Price { currency: Some(Currency::Jpy), .. }
    ));
    assert!(Cli::try_parse_from(["steward", "locale", "set", "fr"]).is_err());
  }
}
