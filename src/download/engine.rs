//! Sequential fetch driver with reconnect-on-failure.
//!
//! The driver walks the enumerated sequence one item at a time over the
//! single [`Connection`] handle. Each attempt is classified into a
//! [`FetchOutcome`]; only `Incomplete` and `Connection` outcomes mean the
//! transport is suspect, and for those the [`ReconnectPolicy`] runs before
//! the *next* item's request. The failed item itself is reported and
//! skipped, never retried.
//!
//! Per-item progress is printed to stdout (separator, `path => file`, then
//! a result line). That output is the user-facing contract of the tool;
//! structured diagnostics additionally go through `tracing`.
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use sndl::download::{Connection, FetchDriver, ReconnectPolicy};
//! use sndl::parser::parse_target;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let target = parse_target("http://example.com/a[1-100].jpg")?;
//! let connection = Connection::open(&target, 30, 300)?;
//! let mut driver = FetchDriver::new(connection, ReconnectPolicy::default(), PathBuf::from("./download"));
//! let stats = driver.run(&target).await?;
//! println!("Completed: {}, Failed: {}", stats.completed(), stats.failed());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument, warn};

use crate::parser::ParsedTarget;
use crate::sequence::{SequenceItem, enumerate};

use super::connection::Connection;
use super::error::FetchError;
use super::reconnect::ReconnectPolicy;

/// Result of one download attempt.
///
/// The variant tag alone decides what happens next: `Incomplete` and
/// `Connection` demand a reconnect before the following item, `Status` and
/// `Failed` do not (the transport is assumed healthy for those).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Body fully streamed to disk.
    Success {
        /// Bytes written to the destination file.
        bytes: u64,
    },

    /// Stream ended before the declared Content-Length was satisfied.
    Incomplete {
        /// Bytes the server still owed when the stream ended.
        remaining: u64,
    },

    /// Server declined this item with an error/redirect status.
    Status {
        /// The HTTP status code.
        code: u16,
        /// Canonical reason phrase for the status.
        reason: String,
    },

    /// Timeout or abrupt peer disconnect while requesting or streaming.
    Connection {
        /// Human-readable description of the transport failure.
        detail: String,
    },

    /// Any other per-item error (local I/O and the like).
    Failed {
        /// Human-readable description of the failure.
        detail: String,
    },
}

impl FetchOutcome {
    /// True when the connection must be re-established before the next item.
    #[must_use]
    pub fn needs_reconnect(&self) -> bool {
        matches!(self, Self::Incomplete { .. } | Self::Connection { .. })
    }

    /// True for a fully completed download.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Statistics from one driver run.
///
/// Items are processed strictly sequentially, so plain counters suffice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    completed: usize,
    failed: usize,
    reconnects: usize,
}

impl FetchStats {
    /// Number of fully downloaded items.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Number of items that failed in any way.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Number of reconnect waits performed during the run.
    #[must_use]
    pub fn reconnects(&self) -> usize {
        self.reconnects
    }

    /// Total items processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.completed + self.failed
    }
}

/// Sequential fetch driver owning the connection and the reconnect policy.
#[derive(Debug)]
pub struct FetchDriver {
    connection: Connection,
    policy: ReconnectPolicy,
    output_dir: PathBuf,
}

impl FetchDriver {
    /// Creates a driver writing into `output_dir`.
    ///
    /// The directory must already exist; creating it is the caller's
    /// pre-flight responsibility and the directory is passed explicitly so
    /// nothing here touches the process working directory.
    #[must_use]
    pub fn new(connection: Connection, policy: ReconnectPolicy, output_dir: PathBuf) -> Self {
        Self {
            connection,
            policy,
            output_dir,
        }
    }

    /// Read access to the connection handle, mainly for inspection in tests.
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Processes every enumerated item of the target, in order.
    ///
    /// Per-item failures never abort the run; they are reported, counted,
    /// and (for connection-suspect outcomes) answered with a reconnect wait
    /// before the next item.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] only if a reconnect cannot
    /// rebuild the HTTP client, which is equivalent to the initial
    /// connection setup failing.
    #[instrument(skip(self, target), fields(origin = %self.connection.origin()))]
    pub async fn run(&mut self, target: &ParsedTarget) -> Result<FetchStats, FetchError> {
        let mut stats = FetchStats::default();
        let mut last = FetchOutcome::Success { bytes: 0 };

        info!("starting sequence");

        for item in enumerate(target) {
            if last.needs_reconnect() {
                self.policy.wait_and_reconnect(&mut self.connection).await?;
                stats.reconnects += 1;
            }

            let outcome = self.fetch_one(&item).await;
            report(&item, &outcome);

            if outcome.is_success() {
                stats.completed += 1;
            } else {
                stats.failed += 1;
            }
            last = outcome;
        }

        info!(
            completed = stats.completed,
            failed = stats.failed,
            reconnects = stats.reconnects,
            total = stats.total(),
            "sequence complete"
        );

        Ok(stats)
    }

    /// Downloads one item: request, stream to a fresh file, classify.
    async fn fetch_one(&mut self, item: &SequenceItem) -> FetchOutcome {
        let dest = self.output_dir.join(&item.filename);
        println!("----------------------------------------");
        println!("{} => {}", item.remote_path, dest.display());

        let response = match self.connection.request(&item.remote_path).await {
            Ok(response) => response,
            Err(e) => return classify_failure(&e),
        };

        let status = response.status();
        if status.as_u16() >= 300 {
            let reason = status.canonical_reason().unwrap_or("unknown").to_string();
            // Drain the body so the kept-alive connection stays usable.
            let _ = response.bytes().await;
            return FetchOutcome::Status {
                code: status.as_u16(),
                reason,
            };
        }

        let declared = response.content_length();
        debug!(path = %item.remote_path, ?declared, "streaming body");

        match stream_to_file(response, &dest, &item.remote_path).await {
            Ok(written) => {
                let outcome = completion_outcome(declared, written);
                if outcome.needs_reconnect() {
                    self.connection.mark_disconnected();
                }
                outcome
            }
            Err(e) => {
                if e.is_connection_failure() {
                    self.connection.mark_disconnected();
                }
                classify_failure(&e)
            }
        }
    }
}

/// Maps a fetch error to its per-item outcome.
///
/// Timeouts and peer-level network failures are connection outcomes; local
/// errors (file I/O) fail the item without implicating the transport.
fn classify_failure(error: &FetchError) -> FetchOutcome {
    if error.is_connection_failure() {
        FetchOutcome::Connection {
            detail: error.to_string(),
        }
    } else {
        FetchOutcome::Failed {
            detail: error.to_string(),
        }
    }
}

/// Judges a cleanly ended stream against the declared Content-Length.
///
/// No declared length means the server ended the body on its own terms;
/// that counts as success. Excess bytes are tolerated, never truncated.
///
/// Note: hyper usually reports a connection that closes short of the
/// declared length as a stream error, which [`classify_failure`] turns into
/// a `Connection` outcome. This check catches servers that end the body
/// cleanly while still short. Either route triggers a reconnect.
fn completion_outcome(declared: Option<u64>, written: u64) -> FetchOutcome {
    match declared {
        Some(expected) if written < expected => FetchOutcome::Incomplete {
            remaining: expected - written,
        },
        _ => FetchOutcome::Success { bytes: written },
    }
}

/// Streams the response body to `dest`, created fresh for this attempt.
///
/// Returns the number of bytes written. On a mid-stream error the partial
/// file is left in place; truncated downloads are reported, not resumed.
async fn stream_to_file(
    response: reqwest::Response,
    dest: &Path,
    remote_path: &str,
) -> Result<u64, FetchError> {
    let file = File::create(dest)
        .await
        .map_err(|e| FetchError::io(dest, e))?;
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| {
            if e.is_timeout() {
                FetchError::timeout(remote_path)
            } else {
                FetchError::network(remote_path, e)
            }
        })?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| FetchError::io(dest, e))?;
        written += chunk.len() as u64;
    }

    writer.flush().await.map_err(|e| FetchError::io(dest, e))?;
    Ok(written)
}

/// Prints the per-item result line and mirrors it into tracing.
fn report(item: &SequenceItem, outcome: &FetchOutcome) {
    match outcome {
        FetchOutcome::Success { bytes } => {
            println!("    ==> Saved: {bytes} bytes.");
            debug!(path = %item.remote_path, bytes, "item complete");
        }
        FetchOutcome::Incomplete { remaining } => {
            println!("    ==> Disconnected: {remaining} bytes remaining.");
            warn!(path = %item.remote_path, remaining, "truncated transfer");
        }
        FetchOutcome::Status { code, reason } => {
            println!("    ==> Result: {code} {reason}");
            warn!(path = %item.remote_path, code, "server declined item");
        }
        FetchOutcome::Connection { detail } | FetchOutcome::Failed { detail } => {
            println!("    ==> Error: {detail}");
            warn!(path = %item.remote_path, detail = %detail, "item failed");
        }
    }
}
