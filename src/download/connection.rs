//! The single connection handle shared by the whole run.
//!
//! The original design goal is one persistent connection to one origin,
//! reused for every item in the sequence. Here that is a [`Connection`]
//! wrapping one `reqwest::Client` pinned to the target origin: reqwest's
//! keep-alive pooling provides the reuse, and [`Connection::reconnect`]
//! rebuilds the client in place so the pooled sockets are discarded and the
//! next request dials fresh.
//!
//! The handle has an observable [`ConnectionState`]. The fetch driver marks
//! it disconnected when a transfer dies mid-stream; the reconnect policy is
//! the only other actor that flips it back, and only between items.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};

use crate::parser::ParsedTarget;

use super::error::FetchError;

/// Observable connectivity of the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// The handle is usable; requests go out on the current client.
    Connected,
    /// A transfer failed in a way that makes the transport suspect.
    Disconnected,
}

/// HTTP connection handle pinned to one origin.
#[derive(Debug)]
pub struct Connection {
    client: Client,
    origin: String,
    connect_timeout: Duration,
    read_timeout: Duration,
    state: ConnectionState,
}

impl Connection {
    /// Opens a connection handle for the parsed target.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the HTTP client cannot be
    /// constructed with the given timeouts.
    #[instrument(skip(target), fields(origin = %target.origin()))]
    pub fn open(
        target: &ParsedTarget,
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, FetchError> {
        let connect_timeout = Duration::from_secs(connect_timeout_secs);
        let read_timeout = Duration::from_secs(read_timeout_secs);
        let client = build_client(connect_timeout, read_timeout)?;
        debug!("connection handle opened");
        Ok(Self {
            client,
            origin: target.origin(),
            connect_timeout,
            read_timeout,
            state: ConnectionState::Connected,
        })
    }

    /// Current connectivity of the handle.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Base URL requests are issued against, without a trailing slash.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Sends a GET for `path` on the current client.
    ///
    /// A send-level failure flips the handle to `Disconnected` when it looks
    /// transport-related (timeout, refused, reset).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Timeout`] or [`FetchError::Network`].
    pub async fn request(&mut self, path: &str) -> Result<reqwest::Response, FetchError> {
        let url = format!("{}{}", self.origin, path);
        match self.client.get(&url).send().await {
            Ok(response) => Ok(response),
            Err(e) => {
                self.state = ConnectionState::Disconnected;
                if e.is_timeout() {
                    Err(FetchError::timeout(path))
                } else {
                    Err(FetchError::network(path, e))
                }
            }
        }
    }

    /// Marks the handle disconnected without tearing anything down.
    ///
    /// Called by the fetch driver when a body stream dies after the request
    /// itself succeeded.
    pub fn mark_disconnected(&mut self) {
        self.state = ConnectionState::Disconnected;
    }

    /// Re-establishes the connection: same origin, same timeouts.
    ///
    /// The client is rebuilt in place, which drops any pooled sockets, so
    /// the next request opens a fresh transport connection.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the replacement client cannot
    /// be constructed.
    #[instrument(skip(self), fields(origin = %self.origin))]
    pub fn reconnect(&mut self) -> Result<(), FetchError> {
        self.client = build_client(self.connect_timeout, self.read_timeout)?;
        self.state = ConnectionState::Connected;
        debug!("connection re-established");
        Ok(())
    }
}

fn build_client(connect_timeout: Duration, read_timeout: Duration) -> Result<Client, FetchError> {
    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(read_timeout)
        .build()
        .map_err(FetchError::ClientBuild)
}
