//! Minecraft Server List Ping client: status queries and latency probes.
//!
//! ```no_run
//! use std::time::Duration;
//! use sounder::{ServerEndpoint, SlpClient};
//!
//! # async fn run() -> sounder::Result<()> {
//! let client = SlpClient::new(ServerEndpoint::new("mc.example.org", 25565)?)
//!     .with_timeout(Duration::from_millis(5000));
//!
//! let json = client.status().await?; // opaque JSON document
//! let rtt = client.ping().await?; // milliseconds
//! # let _ = (json, rtt);
//! # Ok(())
//! # }
//! ```
pub mod proto;

mod client;
mod connection;
mod error;

pub use client::{DEFAULT_TIMEOUT, ServerEndpoint, SlpClient};
pub use error::{Result, SlpError};
