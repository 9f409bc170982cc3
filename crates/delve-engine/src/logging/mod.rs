//! Logging utilities.
//!
//! Engine code logs through the `log` facade; this module installs the
//! `env_logger` backend for binaries.

mod init;

pub use init::{init_logging, LoggingConfig};
