//! Error types
//!
//! HTTP-facing errors. Upstream failures are absorbed by the relays and
//! only surface here when the chat failure mode asks for a status code.

pub mod types;

pub use types::ApiError;
