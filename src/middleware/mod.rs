//! Middleware module
//!
//! Contains HTTP middleware applied to every route.

pub mod logging;

pub use logging::{log_request, REQUEST_ID_HEADER, TRACE_ID_HEADER};
