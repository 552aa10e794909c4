//! Locale file input
//!
//! A locale file is a JSON object mapping canonical phrases to their
//! translations. Comments and trailing commas are allowed. A line comment
//! holding a `"key": "value"` pair marks the key as pending (known to the
//! application, not yet translated):
//!
//! ```jsonc
//! {
//!     "Save": "Zapisz",
//!     // "API token:": "",
//! }
//! ```

use std::collections::{
    BTreeSet,
    HashSet,
};
use std::path::Path;

use jsonc_parser::ParseOptions;
use jsonc_parser::cst::CstRootNode;

use crate::catalog::LocaleError;

/// Parsed contents of one locale file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocaleFile {
    /// Path or name the data came from, used in diagnostics.
    pub origin: String,
    /// Active entries in file order.
    pub entries: Vec<(String, String)>,
    /// Commented-out keys that have no active entry in this file.
    pub pending: BTreeSet<String>,
}

impl LocaleFile {
    /// Parses locale file text.
    ///
    /// # Errors
    /// - Invalid JSON (with comments)
    /// - Root is not an object
    /// - A value is not a string
    /// - A key appears twice
    pub fn parse(text: &str, origin: &str) -> Result<Self, LocaleError> {
        let root = CstRootNode::parse(text, &ParseOptions::default()).map_err(|e| {
            LocaleError::Parse { origin: origin.to_string(), message: e.to_string() }
        })?;
        let Some(object) = root.object_value() else {
            return Err(LocaleError::NotAnObject { origin: origin.to_string() });
        };

        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for prop in object.properties() {
            let key = prop.name().and_then(|name| name.decoded_value().ok()).ok_or_else(|| {
                LocaleError::Parse {
                    origin: origin.to_string(),
                    message: "unreadable property name".to_string(),
                }
            })?;
            let value = prop
                .value()
                .and_then(|value| value.as_string_lit())
                .and_then(|lit| lit.decoded_value().ok())
                .ok_or_else(|| LocaleError::NonStringValue {
                    origin: origin.to_string(),
                    key: key.clone(),
                })?;

            if !seen.insert(key.clone()) {
                return Err(LocaleError::DuplicateKey { origin: origin.to_string(), key });
            }
            entries.push((key, value));
        }

        let pending = lines_with_pending_keys(text)
            .into_iter()
            .filter_map(|(_, key)| key)
            .filter(|key| !seen.contains(key))
            .collect();

        Ok(Self { origin: origin.to_string(), entries, pending })
    }

    /// Reads and parses a locale file from disk.
    pub fn read(path: &Path) -> Result<Self, LocaleError> {
        tracing::debug!(path = %path.display(), "Reading locale file");
        let text = std::fs::read_to_string(path)
            .map_err(|source| LocaleError::Io { path: path.to_path_buf(), source })?;
        Self::parse(&text, &path.to_string_lossy())
    }
}

/// Splits `text` into lines (terminators kept), each paired with the key it
/// comments out.
///
/// Lines that start inside a `/* */` comment never carry a key: only
/// `//` line comments mark pending entries.
pub(crate) fn lines_with_pending_keys(text: &str) -> Vec<(&str, Option<String>)> {
    let mut in_block = false;
    text.split_inclusive('\n')
        .map(|line| {
            let key = if in_block { None } else { pending_key(line) };
            in_block = ends_in_block_comment(line, in_block);
            (line, key)
        })
        .collect()
}

/// Whether a `/* */` comment is still open at the end of `line`.
///
/// JSON strings cannot span lines, so only the block comment state carries
/// over between lines.
fn ends_in_block_comment(line: &str, mut in_block: bool) -> bool {
    let mut in_string = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_block {
            if c == '*' && chars.next_if_eq(&'/').is_some() {
                in_block = false;
            }
        } else if in_string {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => in_string = false,
                _ => {}
            }
        } else {
            match c {
                '"' => in_string = true,
                '/' if chars.next_if_eq(&'/').is_some() => break,
                '/' if chars.next_if_eq(&'*').is_some() => in_block = true,
                _ => {}
            }
        }
    }

    in_block
}

/// Key of a commented-out entry line, e.g. `// "API token:": "",`.
///
/// Ordinary prose comments yield `None`.
fn pending_key(line: &str) -> Option<String> {
    let body = line.trim_start().strip_prefix("//")?.trim().trim_end_matches(',');
    if !body.starts_with('"') {
        return None;
    }

    let root = CstRootNode::parse(&format!("{{{body}}}"), &ParseOptions::default()).ok()?;
    let props = root.object_value()?.properties();
    let [prop] = props.as_slice() else {
        return None;
    };
    prop.name()?.decoded_value().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    const SAMPLE: &str = r#"{
    "None": "Brak",
    "Column %d": "Kolumna %d",
    "Passwords don't match": "Hasła nie pasują do siebie",
    // "API token:": "",
    // Anything below is not translated yet.
    // "Project \"%s\"": "",
    "Leave a description": "",
}
"#;

    #[googletest::test]
    fn test_parse_entries_in_order() {
        let file = LocaleFile::parse(SAMPLE, "sample").unwrap();

        expect_that!(
            file.entries,
            elements_are![
                eq(&("None".to_string(), "Brak".to_string())),
                eq(&("Column %d".to_string(), "Kolumna %d".to_string())),
                eq(&("Passwords don't match".to_string(), "Hasła nie pasują do siebie".to_string())),
                eq(&("Leave a description".to_string(), String::new()))
            ]
        );
    }

    #[googletest::test]
    fn test_parse_pending_comments() {
        let file = LocaleFile::parse(SAMPLE, "sample").unwrap();

        expect_that!(file.pending, elements_are![eq("API token:"), eq("Project \"%s\"")]);
    }

    #[googletest::test]
    fn test_pending_excludes_active_keys() {
        let text = "{\n    // \"Save\": \"\",\n    \"Save\": \"Zapisz\",\n}";

        let file = LocaleFile::parse(text, "sample").unwrap();

        expect_that!(file.pending.len(), eq(0));
        expect_that!(file.entries.len(), eq(1));
    }

    #[rstest]
    fn test_duplicate_key_is_rejected() {
        let text = r#"{"Save": "Zapisz", "Save": "Zachowaj"}"#;

        let result = LocaleFile::parse(text, "dup.jsonc");

        assert!(
            matches!(result, Err(LocaleError::DuplicateKey { ref key, ref origin }) if key == "Save" && origin == "dup.jsonc")
        );
    }

    #[rstest]
    fn test_non_string_value_is_rejected() {
        let result = LocaleFile::parse(r#"{"Column %d": 3}"#, "bad");

        assert!(matches!(result, Err(LocaleError::NonStringValue { ref key, .. }) if key == "Column %d"));
    }

    #[rstest]
    #[case("[\"Save\"]")]
    #[case("\"Save\"")]
    fn test_non_object_root_is_rejected(#[case] text: &str) {
        let result = LocaleFile::parse(text, "bad");

        assert!(matches!(result, Err(LocaleError::NotAnObject { .. })));
    }

    #[rstest]
    fn test_invalid_syntax_is_rejected() {
        let result = LocaleFile::parse(r#"{"Save": "Zapisz""#, "broken");

        assert!(matches!(result, Err(LocaleError::Parse { .. })));
    }

    #[rstest]
    #[case(r#"    // "API token:": "","#, Some("API token:"))]
    #[case(r#"// "Email": """#, Some("Email"))]
    #[case(r#"    // "%s's activity": "","#, Some("%s's activity"))]
    #[case("    // Pending translations follow", None)]
    #[case(r#"    "Save": "Zapisz","#, None)]
    fn test_pending_key(#[case] line: &str, #[case] expected: Option<&str>) {
        assert_eq!(pending_key(line).as_deref(), expected);
    }

    #[googletest::test]
    fn test_block_comments_do_not_mark_pending() {
        let text = "{
    /*
    // \"Removed key\": \"\",
    */
    \"Save\": \"Zapisz\", /* inline */
    // \"API token:\": \"\",
    \"Path\": \"a/*b\",
    // \"Email\": \"\",
}";

        let file = LocaleFile::parse(text, "sample").unwrap();

        expect_that!(file.pending, elements_are![eq("API token:"), eq("Email")]);
    }

    #[rstest]
    #[case("    /* start\n", false, true)]
    #[case("    end */ \"Save\": \"Zapisz\",\n", true, false)]
    #[case("    \"Path\": \"a/*b\",\n", false, false)]
    #[case("    // old /* note\n", false, false)]
    #[case("    \"Quote\": \"\\\"/*\",\n", false, false)]
    fn test_block_comment_state(#[case] line: &str, #[case] before: bool, #[case] after: bool) {
        assert_eq!(ends_in_block_comment(line, before), after);
    }

    #[rstest]
    fn test_read_missing_file() {
        let result = LocaleFile::read(Path::new("/nonexistent/locales/pl_PL/translations.jsonc"));

        assert!(matches!(result, Err(LocaleError::Io { .. })));
    }
}
