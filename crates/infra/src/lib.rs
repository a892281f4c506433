//! # PermID Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The reqwest-backed transport adapter
//! - Environment/TOML configuration loading
//! - Telemetry (tracing + rolling file) setup
//!
//! ## Architecture
//! - Implements traits defined in `permid-core`
//! - Contains all "impure" code (network, filesystem, process globals)

pub mod config;
pub mod http;
pub mod telemetry;

// Re-export commonly used items
pub use http::{ReqwestTransport, ReqwestTransportBuilder};
pub use telemetry::{LogFormat, LogRotation, TelemetryConfig};
