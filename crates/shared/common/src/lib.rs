//! Common utilities shared by the user-service and the gateway.
//!
//! This crate provides:
//! - Unified error handling for HTTP and gRPC
//! - Configuration structures
//! - Graceful shutdown signalling

pub mod config;
pub mod error;
pub mod shutdown;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use shutdown::{shutdown_signal, Shutdown, ShutdownTrigger};
