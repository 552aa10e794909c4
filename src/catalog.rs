//! Locale dictionaries
//!
//! One immutable [`LocaleTable`] per locale, keyed by canonical English
//! phrases. Tables are built by a [`LocaleLoader`] from the embedded assets
//! and any locale files found on disk, and cached by a [`LocaleRegistry`].
/// Embedded locale assets
pub mod builtin;
/// Locale loading errors
mod error;
/// Table construction
mod loader;
/// Load cache
mod registry;
/// Tables and lookup
mod table;

pub use builtin::SOURCE_LOCALE;
pub use error::LocaleError;
pub use loader::{
    LocaleLoader,
    load,
};
pub use registry::LocaleRegistry;
pub use table::{
    LocaleTable,
    TranslationEntry,
    translate,
};
