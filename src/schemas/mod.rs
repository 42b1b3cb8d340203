//! Request/response schemas
//!
//! Wire types for the relay's own HTTP surface and for the upstream APIs.

pub mod chat;
pub mod gemini;
pub mod moltbook;
