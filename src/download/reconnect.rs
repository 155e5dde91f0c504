//! Reconnect policy: countdown wait, then re-establish the connection.

use std::io::{self, Write};
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, instrument};

use super::connection::Connection;
use super::constants::RECONNECT_INTERVAL_SECS;
use super::error::FetchError;

/// Fixed-interval reconnect policy.
///
/// Runs only after a transfer failed in a connection-suspect way, and always
/// *before* the next item's request rather than as a retry of the failed one.
/// The wait is a blocking one-second-tick countdown with a visible
/// remaining-time line; the whole process can be terminated externally, but
/// the wait itself is not cancellable.
#[derive(Debug, Clone)]
pub struct ReconnectPolicy {
    interval: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(RECONNECT_INTERVAL_SECS),
        }
    }
}

impl ReconnectPolicy {
    /// Creates a policy with a custom wait interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Configured wait interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Counts down the configured interval, then reconnects the handle.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the connection cannot be
    /// re-established.
    #[instrument(skip(self, connection), fields(interval_secs = self.interval.as_secs()))]
    pub async fn wait_and_reconnect(&self, connection: &mut Connection) -> Result<(), FetchError> {
        let total = self.interval.as_secs();
        debug!("waiting before reconnect");

        for remaining in (0..=total).rev() {
            let unit = if remaining == 1 { "" } else { "s" };
            print!("        ==> Reconnect after {remaining:3} second{unit}.\r");
            let _ = io::stdout().flush();
            if remaining > 0 {
                sleep(Duration::from_secs(1)).await;
            }
        }

        connection.reconnect()?;
        println!("        ==> Reconnecting.                    ");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::download::ConnectionState;
    use crate::parser::parse_target;

    #[test]
    fn test_default_interval_is_three_minutes() {
        assert_eq!(ReconnectPolicy::default().interval(), Duration::from_secs(180));
    }

    #[tokio::test]
    async fn test_zero_interval_reconnects_immediately() {
        let target = parse_target("http://127.0.0.1/a[1-2].jpg").unwrap();
        let mut connection = Connection::open(&target, 30, 300).unwrap();
        connection.mark_disconnected();

        let policy = ReconnectPolicy::new(Duration::ZERO);
        policy.wait_and_reconnect(&mut connection).await.unwrap();
        assert_eq!(connection.state(), ConnectionState::Connected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_waits_full_interval() {
        let target = parse_target("http://127.0.0.1/a[1-2].jpg").unwrap();
        let mut connection = Connection::open(&target, 30, 300).unwrap();
        connection.mark_disconnected();

        let policy = ReconnectPolicy::new(Duration::from_secs(3));
        let before = tokio::time::Instant::now();
        policy.wait_and_reconnect(&mut connection).await.unwrap();
        // Paused clock auto-advances across the sleeps; total must be the interval.
        assert_eq!(before.elapsed(), Duration::from_secs(3));
        assert_eq!(connection.state(), ConnectionState::Connected);
    }
}
