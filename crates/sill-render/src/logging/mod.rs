//! Logging utilities.
//!
//! Centralizes logger initialization behind the standard `log` facade so
//! every crate in the workspace emits through one configured backend.

mod init;

pub use init::{LoggingConfig, init_logging};
