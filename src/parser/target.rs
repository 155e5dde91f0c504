//! Target URL parsing: locating the bracket expression and splitting the path.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use url::Url;

use super::error::ParseError;
use super::range::{PathTemplate, SubRange};

/// Matches the first bracketed region of digits, commas, and hyphens.
///
/// The inner group is `*` rather than `+` so that an explicitly empty
/// expression (`[]`) is found and reported as `EmptyRange` instead of
/// falling through to `NoRangeSpecified`.
#[allow(clippy::expect_used)]
static RANGE_REGION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([0-9,\-]*)\]").expect("range region regex is valid"));

/// URL scheme of the target host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Plain HTTP.
    Http,
    /// HTTP over TLS.
    Https,
}

impl Scheme {
    /// Scheme name as it appears in a URL.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    /// Well-known port used when the URL does not name one.
    #[must_use]
    pub fn default_port(&self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable result of parsing the target URL.
///
/// Constructed once by [`parse_target`] and never mutated for the rest of
/// the run. Holds everything the enumerator and the connection need: the
/// origin coordinates, the [`PathTemplate`] with the bracket region cut out,
/// the raw tokens in their original comma order, and the validated
/// [`SubRange`] list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTarget {
    scheme: Scheme,
    host: String,
    port: Option<u16>,
    template: PathTemplate,
    tokens: Vec<String>,
    ranges: Vec<SubRange>,
}

impl ParsedTarget {
    /// URL scheme of the target.
    #[must_use]
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Hostname of the target.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port named in the URL, if any.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Port the connection will actually use (explicit or scheme default).
    #[must_use]
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.scheme.default_port())
    }

    /// Path template with the bracket region replaced by a substitution point.
    #[must_use]
    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// Raw range tokens in their original left-to-right comma order.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Parsed sub-ranges, one per token, same order.
    #[must_use]
    pub fn ranges(&self) -> &[SubRange] {
        &self.ranges
    }

    /// Base URL for requests, e.g. `http://example.com` or
    /// `http://example.com:8080`. Default ports are left implicit.
    #[must_use]
    pub fn origin(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.scheme, self.host, port),
            None => format!("{}://{}", self.scheme, self.host),
        }
    }
}

/// Parses a target URL containing a bracketed numeric-range expression.
///
/// The first substring of the path matching `[digits, commas, hyphens]` is
/// the substitution region; everything before and after it is retained
/// verbatim in the resulting template. The bracket contents split on commas
/// into tokens (whitespace trimmed, empty tokens dropped, order preserved)
/// and each token is validated eagerly, so a malformed token fails the whole
/// parse before any network activity.
///
/// This is a pure function of its input: parsing the same URL twice yields
/// identical [`ParsedTarget`] values.
///
/// # Examples
///
/// ```
/// use sndl::parser::parse_target;
///
/// let target = parse_target("http://www.example.com/a[1-100].jpg").unwrap();
/// assert_eq!(target.host(), "www.example.com");
/// assert_eq!(target.template().to_string(), "/a[*].jpg");
/// assert_eq!(target.tokens(), ["1-100"]);
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] when the URL is malformed, uses a non-web
/// scheme, has no bracket expression, has an empty one, or contains a token
/// that is neither a number nor a dash range.
pub fn parse_target(url: &str) -> Result<ParsedTarget, ParseError> {
    let parsed = Url::parse(url).map_err(|e| ParseError::malformed(url, &e.to_string()))?;

    let scheme = match parsed.scheme() {
        "http" => Scheme::Http,
        "https" => Scheme::Https,
        other => return Err(ParseError::unsupported_scheme(url, other)),
    };

    let host = parsed
        .host_str()
        .ok_or_else(|| ParseError::no_host(url))?
        .to_string();
    let port = parsed.port();
    let path = parsed.path();

    let caps = RANGE_REGION
        .captures(path)
        .ok_or_else(|| ParseError::no_range(path))?;
    let region = caps.get(0).ok_or_else(|| ParseError::no_range(path))?;
    let inner = caps.get(1).map_or("", |m| m.as_str());

    let tokens: Vec<String> = inner
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .collect();
    if tokens.is_empty() {
        return Err(ParseError::empty_range(path));
    }

    let ranges = tokens
        .iter()
        .map(|token| SubRange::parse(token))
        .collect::<Result<Vec<_>, _>>()?;

    let template = PathTemplate::new(&path[..region.start()], &path[region.end()..]);
    debug!(host = %host, template = %template, tokens = tokens.len(), "target parsed");

    Ok(ParsedTarget {
        scheme,
        host,
        port,
        template,
        tokens,
        ranges,
    })
}
