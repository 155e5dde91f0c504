//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use sndl::download::constants::{READ_TIMEOUT_SECS, RECONNECT_INTERVAL_SECS};

const AFTER_HELP: &str = "\
Target URL examples:
  * http://www.example.com/a[1-100].jpg
    The basic syntax: downloads a1.jpg through a100.jpg from www.example.com.

  * http://www.example.com/b[2,4,8,10].jpg
    If some numbers are skipped.

  * http://www.example.com/c[1,2-5,7,10-13,22-25].jpg
    Singular numbers and ranges can be mixed and matched.

  * http://www.example.com/[0001-0025].jpg
    Zero-padding follows the digit count of the number (the starting
    number, for a range).";

/// Download sequentially numbered files.
///
/// Expands the bracketed numeric range in the target URL into an ordered
/// sequence of files and downloads them one by one over a single reused
/// connection, reconnecting automatically when the server drops a transfer.
#[derive(Parser, Debug)]
#[command(name = "sndl")]
#[command(author, version, about)]
#[command(after_help = AFTER_HELP)]
pub struct Args {
    /// The URL of the target files, including the sequential number range
    pub target_url: String,

    /// Path to the output directory (created if missing)
    #[arg(short, long, default_value = "./download")]
    pub output: PathBuf,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Seconds to wait before reconnecting after a dropped transfer
    #[arg(short, long, default_value_t = RECONNECT_INTERVAL_SECS)]
    pub wait: u64,

    /// Read timeout in seconds for each transfer
    #[arg(long, default_value_t = READ_TIMEOUT_SECS)]
    pub timeout: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_url_and_defaults_parse_successfully() {
        let args = Args::try_parse_from(["sndl", "http://example.com/a[1-3].jpg"]).unwrap();
        assert_eq!(args.target_url, "http://example.com/a[1-3].jpg");
        assert_eq!(args.output, PathBuf::from("./download"));
        assert_eq!(args.verbose, 0);
        assert_eq!(args.wait, 180);
        assert_eq!(args.timeout, 300);
    }

    #[test]
    fn test_cli_missing_url_returns_error() {
        let result = Args::try_parse_from(["sndl"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["sndl", "-v", "http://e.com/a[1].jpg"]).unwrap();
        assert_eq!(args.verbose, 1);

        let args = Args::try_parse_from(["sndl", "-vv", "http://e.com/a[1].jpg"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_output_short_and_long_flags() {
        let args =
            Args::try_parse_from(["sndl", "-o", "/tmp/pics", "http://e.com/a[1].jpg"]).unwrap();
        assert_eq!(args.output, PathBuf::from("/tmp/pics"));

        let args =
            Args::try_parse_from(["sndl", "--output", "out", "http://e.com/a[1].jpg"]).unwrap();
        assert_eq!(args.output, PathBuf::from("out"));
    }

    #[test]
    fn test_cli_wait_flag_overrides_default() {
        let args = Args::try_parse_from(["sndl", "-w", "10", "http://e.com/a[1].jpg"]).unwrap();
        assert_eq!(args.wait, 10);
    }

    #[test]
    fn test_cli_timeout_flag_overrides_default() {
        let args =
            Args::try_parse_from(["sndl", "--timeout", "60", "http://e.com/a[1].jpg"]).unwrap();
        assert_eq!(args.timeout, 60);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        // --help causes early exit, so we check it returns an error with Help kind
        let result = Args::try_parse_from(["sndl", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        let result = Args::try_parse_from(["sndl", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let result = Args::try_parse_from(["sndl", "--invalid-flag", "http://e.com/a[1].jpg"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
