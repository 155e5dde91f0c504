//! Target URL parsing for bracketed numeric-range expressions.
//!
//! This module turns a URL like `http://example.com/a[1-100].jpg` into an
//! immutable [`ParsedTarget`]: origin coordinates, a [`PathTemplate`] with
//! the bracket region cut out, and the validated [`SubRange`] list.
//!
//! Supported range syntax inside the brackets:
//!
//! - `[1-100]` - a dash range, expanded inclusively
//! - `[2,4,8,10]` - a comma list of singletons
//! - `[1,2-5,7,10-13]` - mixed forms
//! - `[0001-0025]` - zero-padded; the literal width becomes the padding width
//!
//! All parse failures are pre-flight fatal: nothing is downloaded when the
//! range expression is missing, empty, or malformed.
//!
//! # Example
//!
//! ```
//! use sndl::parser::parse_target;
//!
//! let target = parse_target("http://www.example.com/b[2,4,8,10].jpg").unwrap();
//! assert_eq!(target.tokens(), ["2", "4", "8", "10"]);
//! ```

mod error;
mod range;
mod target;

pub use error::ParseError;
pub use range::{PathTemplate, SubRange};
pub use target::{ParsedTarget, Scheme, parse_target};
