//! Input data definitions
/// Locale file parsing
pub mod locale_file;

pub use locale_file::LocaleFile;
