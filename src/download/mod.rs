//! Sequential download over a single reusable connection.
//!
//! The pieces compose in one direction: a [`Connection`] is opened for the
//! parsed target's origin, a [`FetchDriver`] walks the enumerated sequence
//! over it, and a [`ReconnectPolicy`] re-establishes the connection between
//! items when a transfer died in a connection-suspect way.

pub mod constants;

mod connection;
mod engine;
mod error;
mod reconnect;

pub use connection::{Connection, ConnectionState};
pub use engine::{FetchDriver, FetchOutcome, FetchStats};
pub use error::FetchError;
pub use reconnect::ReconnectPolicy;
