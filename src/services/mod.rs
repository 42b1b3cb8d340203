//! Services module
//!
//! Upstream clients, the credential guard, and the relays built on them.

pub mod chat;
pub mod credentials;
pub mod gemini;
pub mod moltbook;
pub mod proxy;

pub use chat::{ChatOutcome, ChatRelay};
pub use credentials::{Credential, CredentialGuard, Upstream};
pub use gemini::{GeminiService, GeminiServiceError};
pub use moltbook::{MoltbookService, MoltbookServiceError};
pub use proxy::{MoltbookProxy, ProxyEndpoint};
