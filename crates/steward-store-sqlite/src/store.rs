//! [`SqliteKv`] — the SQLite implementation of [`KeyValueStore`].

use std::path::Path;

use rusqlite::{Connection, OptionalExtension as _};
use steward_core::kv::KeyValueStore;

use crate::{Error, Result, schema::SCHEMA};

/// A key-value store backed by a single SQLite file.
pub struct SqliteKv {
  conn: Connection,
}

impl SqliteKv {
  /// Open (or create) a store at `path`, creating parent directories, and
  /// run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      std::fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
        path: parent.to_path_buf(),
        source,
      })?;
    }
    let conn = Connection::open(path)?;
    tracing::debug!(path = %path.display(), "opened key-value store");
    Self::init(conn)
  }

  /// Open an in-memory store — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    Self::init(Connection::open_in_memory()?)
  }

  fn init(conn: Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn })
  }

  /// All keys currently stored, sorted.
  pub fn keys(&self) -> Result<Vec<String>> {
    let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key")?;
    let keys = stmt
      .query_map([], |row| row.get(0))?
      .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(keys)
  }
}

impl KeyValueStore for SqliteKv {
  type Error = Error;

  fn get(&self, key: &str) -> Result<Option<String>> {
    let value = self
      .conn
      .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
      .optional()?;
    Ok(value)
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    self.conn.execute(
      "INSERT INTO kv (key, value) VALUES (?1, ?2)
       ON CONFLICT (key) DO UPDATE SET value = excluded.value",
      [key, value],
    )?;
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<()> {
    self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
    Ok(())
  }
}
