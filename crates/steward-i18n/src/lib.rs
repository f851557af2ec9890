//! Localization for the Steward console.
//!
//! A [`Catalog`] holds one nested dictionary per supported [`Locale`]. The
//! [`Localizer`] tracks the active locale, persists it through a
//! [`KeyValueStore`](steward_core::kv::KeyValueStore), and resolves dotted
//! keys with a fixed fallback order: active locale, default locale, then the
//! key itself. Resolution never fails.
//!
//! ```no_run
//! use steward_core::kv::MemoryStore;
//! use steward_i18n::{Catalog, Locale, Localizer, Params};
//!
//! let mut l10n = Localizer::new(Catalog::bundled().unwrap(), MemoryStore::new());
//! l10n.set_locale(Locale::Jp);
//! let text = l10n.resolve("auth.loggedInAs", Some(&Params::new().with("name", "Ann").with("role", "admin")));
//! println!("{text}");
//! ```

pub mod catalog;
pub mod dict;
pub mod error;
pub mod format;
pub mod locale;
mod localizer;
pub mod resolve;

pub use catalog::{Catalog, CoverageReport, LocaleCoverage};
pub use dict::DictNode;
pub use error::{Error, Result};
pub use locale::Locale;
pub use localizer::Localizer;
pub use resolve::Params;
