//! board-locale
//!
//! Locale dictionaries for a kanban board application. Canonical English
//! phrases are the lookup keys; each locale maps them to translated text
//! with printf-style positional placeholders.
//!
//! ```
//! use board_locale::{Arg, load};
//!
//! let polish = load("pl_PL").unwrap();
//! assert_eq!(polish.translate("Save", &[]), "Zapisz");
//! assert_eq!(polish.translate("Column %d", &[Arg::from(3)]), "Kolumna 3");
//! assert_eq!(polish.translate("API token:", &[]), "API token:");
//! ```

pub mod audit;
pub mod catalog;
pub mod config;
pub mod discovery;
pub mod edit;
pub mod format;
pub mod input;
pub mod locale_id;
pub mod translator;

#[cfg(test)]
mod test_utils;

pub use catalog::{
    LocaleError,
    LocaleLoader,
    LocaleRegistry,
    LocaleTable,
    TranslationEntry,
    load,
    translate,
};
pub use format::Arg;
pub use locale_id::LocaleId;
pub use translator::Translator;
