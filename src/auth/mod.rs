//! Authentication module for the Kyte API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Identity and chained-HMAC signature derivation for authenticated requests
//! - Session token state read by every request and written at session establishment

mod credentials;
mod session;
mod signature;
mod timestamp;

pub use credentials::Credentials;
pub(crate) use session::SessionState;
pub use session::SessionTokens;
pub use signature::{TRANSACTION_TOKEN_PLACEHOLDER, identity_header, sign_request};
pub use timestamp::RequestTimestamp;
