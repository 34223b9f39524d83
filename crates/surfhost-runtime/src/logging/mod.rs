//! Logger setup.
//!
//! The runtime only emits through the `log` facade; this wires up
//! `env_logger` for binaries that want it.

mod init;

pub use init::{init_logging, LoggingConfig};
