//! Runtime configuration, layered from an optional TOML file and `STEWARD_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use steward_core::{access::NavPolicy, directory::DEFAULT_SHARED_SECRET};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
  /// SQLite file holding the persisted session and locale. `~` is expanded.
  pub store_path:    PathBuf,
  /// Secret accepted by the built-in directory for every account.
  pub shared_secret: String,
  pub nav_policy:    NavPolicy,
}

impl Default for ConsoleConfig {
  fn default() -> Self {
    Self {
      store_path:    PathBuf::from("~/.local/share/steward/steward.db"),
      shared_secret: DEFAULT_SHARED_SECRET.to_owned(),
      nav_policy:    NavPolicy::default(),
    }
  }
}

impl ConsoleConfig {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("STEWARD"))
      .build()
      .context("failed to read config file")?;

    let mut cfg: Self = settings
      .try_deserialize()
      .context("failed to deserialise ConsoleConfig")?;
    cfg.store_path = under_home(cfg.store_path);

    if cfg.nav_policy == NavPolicy::AdminBypass {
      tracing::warn!(
        "nav_policy = admin_bypass lists routes that the access gate will deny"
      );
    }
    Ok(cfg)
  }
}

/// Re-root a `~`-prefixed store path at `$HOME`. Without `HOME` the path is
/// kept as written.
fn under_home(path: PathBuf) -> PathBuf {
  let Some(home) = std::env::var_os("HOME") else {
    return path;
  };
  match path.strip_prefix("~") {
    Ok(rest) => PathBuf::from(home).join(rest),
    Err(_) => path,
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use super::*;

  #[test]
  fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ConsoleConfig::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(cfg.shared_secret, DEFAULT_SHARED_SECRET);
    assert_eq!(cfg.nav_policy, NavPolicy::Strict);
    assert!(cfg.store_path.ends_with("steward/steward.db"));
  }

  #[test]
  fn file_values_override_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
      file,
      "store_path = \"/tmp/console.db\"\nshared_secret = \"s3cret\"\nnav_policy = \"admin_bypass\""
    )
    .unwrap();

    let cfg = ConsoleConfig::load(file.path()).unwrap();
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/console.db"));
    assert_eq!(cfg.shared_secret, "s3cret");
    assert_eq!(cfg.nav_policy, NavPolicy::AdminBypass);
  }

  #[test]
  fn store_path_is_rerooted_at_home() {
    if let Some(home) = std::env::var_os("HOME") {
      assert_eq!(
        under_home(PathBuf::from("~/data/x.db")),
        PathBuf::from(home).join("data/x.db")
      );
    }
    assert_eq!(under_home(PathBuf::from("/abs/x.db")), PathBuf::from("/abs/x.db"));
    // Only a bare `~` component is special.
    assert_eq!(under_home(PathBuf::from("~alice/x.db")), PathBuf::from("~alice/x.db"));
  }
}
