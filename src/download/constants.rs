//! Constants for the download module (timeouts, reconnect interval).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default read timeout (5 minutes, sized for long single-file transfers).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Default countdown before reconnecting after a dropped transfer (3 minutes).
pub const RECONNECT_INTERVAL_SECS: u64 = 180;
