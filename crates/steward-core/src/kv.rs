//! The `KeyValueStore` trait and the in-memory store.
//!
//! Session and locale state survive restarts by writing to a flat string
//! namespace. Backends only need atomic single-key get/set/remove; the
//! durable implementation lives in `steward-store-sqlite`.

use std::{cell::RefCell, collections::BTreeMap, convert::Infallible, rc::Rc};

/// Key holding the JSON-serialised [`Principal`](crate::principal::Principal)
/// of the active session.
pub const SESSION_KEY: &str = "adminUser";

/// Key holding the two-letter code of the active locale.
pub const LOCALE_KEY: &str = "adminLanguage";

/// Synchronous, single-key persistence.
///
/// Implementations are used from one thread; there is no `Send`/`Sync`
/// requirement on the store itself.
pub trait KeyValueStore {
  type Error: std::error::Error + Send + Sync + 'static;

  fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

  /// Insert or overwrite `key`.
  fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

  /// Remove `key`. Removing an absent key succeeds.
  fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
  type Error = T::Error;

  fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
    (**self).get(key)
  }

  fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
    (**self).set(key, value)
  }

  fn remove(&self, key: &str) -> Result<(), Self::Error> {
    (**self).remove(key)
  }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
  type Error = T::Error;

  fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
    (**self).get(key)
  }

  fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
    (**self).set(key, value)
  }

  fn remove(&self, key: &str) -> Result<(), Self::Error> {
    (**self).remove(key)
  }
}

// ─── In-memory store ─────────────────────────────────────────────────────────

/// A non-durable store, useful for testing.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  pub fn len(&self) -> usize { self.entries.borrow().len() }

  pub fn is_empty(&self) -> bool { self.entries.borrow().is_empty() }
}

impl KeyValueStore for MemoryStore {
  type Error = Infallible;

  fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
    Ok(self.entries.borrow().get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
    self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), Self::Error> {
    self.entries.borrow_mut().remove(key);
    Ok(())
  }
}
