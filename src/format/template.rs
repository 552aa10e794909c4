//! Template parsing and positional substitution.

use super::Arg;

/// printf conversion of a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Conversion {
    /// `%s`
    String,
    /// `%d`
    Decimal,
    /// `%u`
    Unsigned,
    /// `%f`
    Float,
}

impl Conversion {
    /// Conversion for a printf conversion character.
    const fn from_char(c: char) -> Option<Self> {
        match c {
            's' => Some(Self::String),
            'd' => Some(Self::Decimal),
            'u' => Some(Self::Unsigned),
            'f' => Some(Self::Float),
            _ => None,
        }
    }

    /// printf conversion character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::String => 's',
            Self::Decimal => 'd',
            Self::Unsigned => 'u',
            Self::Float => 'f',
        }
    }
}

/// A positional placeholder such as `%s`, `%2$d` or `%.2f`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// 1-based explicit argument index (`%2$s`).
    pub index: Option<usize>,
    /// Maximum characters for `%s`, decimals for `%f`.
    pub precision: Option<usize>,
    /// Conversion character.
    pub conversion: Conversion,
    /// Source text, written back when no argument is available.
    raw: String,
}

impl Placeholder {
    /// Source text of the placeholder.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Renders `arg` with this placeholder's conversion.
    ///
    /// Arguments without a numeric reading are written as text so nothing
    /// is silently dropped.
    fn format_arg(&self, arg: &Arg<'_>) -> String {
        match self.conversion {
            Conversion::String => {
                let text = arg.to_string();
                match self.precision {
                    Some(max) => text.chars().take(max).collect(),
                    None => text,
                }
            }
            Conversion::Decimal => {
                arg.as_int().map_or_else(|| arg.to_string(), |value| value.to_string())
            }
            Conversion::Unsigned => arg.as_int().map_or_else(
                || arg.to_string(),
                |value| u64::from_ne_bytes(value.to_ne_bytes()).to_string(),
            ),
            Conversion::Float => arg.as_float().map_or_else(
                || arg.to_string(),
                |value| format!("{value:.precision$}", precision = self.precision.unwrap_or(6)),
            ),
        }
    }
}

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Text copied as-is, with `%%` already unescaped.
    Literal(String),
    /// A substitution point.
    Placeholder(Placeholder),
}

/// A parsed message template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    /// Literal text and placeholders in source order.
    segments: Vec<Segment>,
}

impl Template {
    /// Parses a template. Never fails: text that is not a recognized
    /// placeholder is kept as a literal.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = text;

        while let Some((before, after)) = rest.split_once('%') {
            literal.push_str(before);

            if let Some(tail) = after.strip_prefix('%') {
                literal.push('%');
                rest = tail;
                continue;
            }

            if let Some((placeholder, tail)) = parse_placeholder(after) {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder(placeholder));
                rest = tail;
            } else {
                literal.push('%');
                rest = after;
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    /// Placeholders in source order.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(placeholder) => Some(placeholder),
            Segment::Literal(_) => None,
        })
    }

    /// Substitutes `args` positionally.
    ///
    /// Placeholders without an explicit index consume arguments in order;
    /// indexed ones (`%2$s`) do not advance that order. A placeholder whose
    /// argument is missing is written verbatim.
    #[must_use]
    pub fn render(&self, args: &[Arg<'_>]) -> String {
        let mut out = String::new();
        let mut next = 0;

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(placeholder) => {
                    let position = placeholder.index.map_or_else(
                        || {
                            next += 1;
                            next - 1
                        },
                        |index| index - 1,
                    );
                    match args.get(position) {
                        Some(arg) => out.push_str(&placeholder.format_arg(arg)),
                        None => out.push_str(&placeholder.raw),
                    }
                }
            }
        }

        out
    }
}

/// Splits leading ASCII digits off `text`.
fn split_digits(text: &str) -> (&str, &str) {
    let end = text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len());
    text.split_at(end)
}

/// Parses a placeholder body following a `%`.
///
/// Returns the placeholder and the remaining text, or `None` when the body
/// is not a printf conversion.
fn parse_placeholder(body: &str) -> Option<(Placeholder, &str)> {
    let mut rest = body;

    let (digits, tail) = split_digits(rest);
    let index = if digits.is_empty() {
        None
    } else {
        let tail = tail.strip_prefix('$')?;
        let index = digits.parse::<usize>().ok().filter(|index| *index > 0)?;
        rest = tail;
        Some(index)
    };

    let precision = if let Some(tail) = rest.strip_prefix('.') {
        let (digits, tail) = split_digits(tail);
        let precision = digits.parse::<usize>().ok()?;
        rest = tail;
        Some(precision)
    } else {
        None
    };

    let mut chars = rest.chars();
    let conversion = Conversion::from_char(chars.next()?)?;
    let tail = chars.as_str();
    let consumed = body.get(..body.len() - tail.len())?;

    Some((Placeholder { index, precision, conversion, raw: format!("%{consumed}") }, tail))
}
