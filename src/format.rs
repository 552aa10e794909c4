//! Positional placeholder formatting.
//!
//! Templates use printf conventions: `%s`, `%d`, `%u`, `%f`, an optional
//! `n$` argument index (`%2$s`) and an optional precision (`%.2f`).
//! `%%` renders a literal percent sign. Anything else following a `%`
//! (date conversions such as `%B` or `%e`) is literal text here.
/// Format arguments
mod arg;
/// HTML escaping for arguments
mod html;
/// Template parsing and rendering
mod template;

pub use arg::Arg;
pub use html::escape_html;
pub use template::{
    Conversion,
    Placeholder,
    Template,
};

/// Parses `template` and substitutes `args` positionally.
///
/// Unmatched placeholders stay verbatim, surplus arguments are ignored.
#[must_use]
pub fn format_positional(template: &str, args: &[Arg<'_>]) -> String {
    Template::parse(template).render(args)
}
