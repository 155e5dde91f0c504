//! # sndl
//!
//! Sequential numbered-file downloader. Takes a URL containing a bracketed
//! numeric range expression, expands it into an ordered sequence of file
//! paths, and downloads each one over a single reused HTTP connection,
//! reconnecting automatically when the server drops the transfer.
//!
//! ```text
//! http://host/gallery/img[0001-0025].jpg
//!   -> /gallery/img0001.jpg, /gallery/img0002.jpg, ..., /gallery/img0025.jpg
//! ```
//!
//! ## Modules
//!
//! - [`parser`]: range-expression URL parsing ([`parser::parse_target`])
//! - [`sequence`]: lazy expansion into ordered download items
//! - [`download`]: connection handle, fetch driver, reconnect policy

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod parser;
pub mod sequence;

pub use download::{Connection, FetchDriver, FetchStats, ReconnectPolicy};
pub use parser::{ParseError, ParsedTarget, parse_target};
