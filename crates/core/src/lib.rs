//! # PermID Core
//!
//! Pure service logic behind ports - no HTTP stack dependencies.
//!
//! This crate contains:
//! - The transport port (trait) and its exchange types
//! - The request gateway (failure classification + quota accounting)
//! - The response normalizer
//! - The operation façade service
//!
//! ## Architecture Principles
//! - Only depends on `permid-domain`
//! - The HTTP stack is injected via the [`ports::HttpTransport`] trait
//! - Fully testable with an in-memory stub transport

pub mod gateway;
pub mod normalize;
pub mod ports;
pub mod service;
pub mod usage;

// Re-export specific items to avoid ambiguity
pub use gateway::RequestGateway;
pub use ports::{HttpMethod, HttpTransport, Payload, RawResponse, RequestSpec};
pub use service::PermIdService;
pub use usage::UsageLedger;
