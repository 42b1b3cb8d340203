//! API endpoint handlers module
//!
//! Contains all HTTP endpoint handler implementations.

pub mod chat;
pub mod health;
pub mod moltbook;
