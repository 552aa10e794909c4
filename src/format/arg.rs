//! Positional format arguments.

use std::borrow::Cow;
use std::fmt;

use super::html::escape_html;

/// A value substituted into a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg<'a> {
    /// Text, possibly borrowed.
    Str(Cow<'a, str>),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
}

impl Arg<'_> {
    /// Returns a copy whose text is HTML-escaped. Numbers are unchanged.
    #[must_use]
    pub fn html_escaped(&self) -> Arg<'_> {
        match self {
            Self::Str(text) => Arg::Str(escape_html(text)),
            Self::Int(value) => Arg::Int(*value),
            Self::Float(value) => Arg::Float(*value),
        }
    }

    /// Integer view used by `%d` and `%u`.
    ///
    /// Floats are truncated toward zero; text is parsed after trimming.
    /// `None` means the argument has no integer reading.
    #[allow(clippy::cast_possible_truncation)]
    pub(super) fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Float(value) if value.is_finite() => Some(*value as i64),
            Self::Float(_) => None,
            Self::Str(text) => text.trim().parse().ok(),
        }
    }

    /// Float view used by `%f`.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Str(text) => text.trim().parse().ok(),
        }
    }
}

impl fmt::Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(text) => f.write_str(text),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(value: &'a String) -> Self {
        Self::Str(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for Arg<'_> {
    fn from(value: String) -> Self {
        Self::Str(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, str>> for Arg<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for Arg<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Arg<'_> {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

/// Lossless integer conversions.
macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg<'_> {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// Integer conversions that may not fit in `i64`; out of range values are
/// passed as text so they still display.
macro_rules! impl_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg<'_> {
                fn from(value: $ty) -> Self {
                    i64::try_from(value)
                        .map_or_else(|_| Self::Str(Cow::Owned(value.to_string())), Self::Int)
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize, i128, u128, isize);

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn from_conversions() {
        assert_eq!(Arg::from("Alice"), Arg::Str(Cow::Borrowed("Alice")));
        assert_eq!(Arg::from(3), Arg::Int(3));
        assert_eq!(Arg::from(7_usize), Arg::Int(7));
        assert_eq!(Arg::from(u64::MAX), Arg::Str(Cow::Owned(u64::MAX.to_string())));
        assert_eq!(Arg::from(1.5), Arg::Float(1.5));
    }

    #[rstest]
    #[case(Arg::Int(42), Some(42))]
    #[case(Arg::Float(-2.9), Some(-2))]
    #[case(Arg::from(" 12 "), Some(12))]
    #[case(Arg::from("twelve"), None)]
    #[case(Arg::Float(f64::NAN), None)]
    fn integer_view(#[case] arg: Arg<'_>, #[case] expected: Option<i64>) {
        assert_eq!(arg.as_int(), expected);
    }

    #[rstest]
    fn html_escaped_only_touches_text() {
        assert_eq!(Arg::from("<b>").html_escaped(), Arg::from("&lt;b&gt;"));
        assert_eq!(Arg::Int(5).html_escaped(), Arg::Int(5));
    }
}
