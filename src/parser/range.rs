//! Range tokens and the path template they substitute into.
//!
//! A bracket expression like `[1,2-5,0007]` splits into comma-separated
//! tokens, each parsed into a [`SubRange`]. The padding width of a sub-range
//! is the character length of the token's *first* number literal, so leading
//! zeros written by the user (`0001-0025`) survive as the display width.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::error::ParseError;

/// Matches a dash-range token like `1-100` or `0001-0025`.
#[allow(clippy::expect_used)]
static DASH_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)-([0-9]+)$").expect("dash range regex is valid"));

/// Matches a singleton token like `7` or `0007`.
#[allow(clippy::expect_used)]
static SINGLETON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)$").expect("singleton regex is valid"));

/// One parsed range token: an inclusive numeric span plus its padding width.
///
/// Reversed literals (`100-1`) are normalized so `start <= end` always holds;
/// enumeration is therefore always ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubRange {
    start: u64,
    end: u64,
    width: usize,
}

impl SubRange {
    /// Parses one comma-separated token of a bracket expression.
    ///
    /// Accepted forms are `^\d+$` (singleton) and `^\d+-\d+$` (dash range).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidRangeFormat`] for anything else, including
    /// numbers too large for `u64`.
    pub fn parse(token: &str) -> Result<Self, ParseError> {
        if let Some(caps) = DASH_RANGE.captures(token) {
            let first = &caps[1];
            let second = &caps[2];
            let a = first
                .parse::<u64>()
                .map_err(|_| ParseError::invalid_range_format(token))?;
            let b = second
                .parse::<u64>()
                .map_err(|_| ParseError::invalid_range_format(token))?;
            let (start, end) = if a > b { (b, a) } else { (a, b) };
            Ok(Self {
                start,
                end,
                // Width comes from the literal as written, not the swapped bounds.
                width: first.len(),
            })
        } else if let Some(caps) = SINGLETON.captures(token) {
            let literal = &caps[1];
            let value = literal
                .parse::<u64>()
                .map_err(|_| ParseError::invalid_range_format(token))?;
            Ok(Self {
                start: value,
                end: value,
                width: literal.len(),
            })
        } else {
            Err(ParseError::invalid_range_format(token))
        }
    }

    /// First value of the span (inclusive).
    #[must_use]
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Last value of the span (inclusive).
    #[must_use]
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Minimum number of characters each rendered value is padded to.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of values in the span.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// A span is never empty; provided for completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Lazily yields the zero-padded decimal strings of the span, ascending.
    ///
    /// Values are left-padded with `'0'` to at least [`width`](Self::width)
    /// characters; values that are naturally wider are never truncated.
    pub fn values(&self) -> impl Iterator<Item = String> + use<> {
        let width = self.width;
        (self.start..=self.end).map(move |n| format!("{n:0>width$}"))
    }
}

/// The URL path with the bracket expression cut out.
///
/// `render` splices a padded value back into the substitution point, which
/// keeps formatting decisions in one place instead of scattering marker
/// strings through the fetch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    prefix: String,
    suffix: String,
}

impl PathTemplate {
    /// Creates a template from the path text before and after the brackets.
    #[must_use]
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Renders the full request path for one enumerated value.
    #[must_use]
    pub fn render(&self, value: &str) -> String {
        format!("{}{}{}", self.prefix, value, self.suffix)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[*]{}", self.prefix, self.suffix)
    }
}
