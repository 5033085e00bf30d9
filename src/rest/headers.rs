//! Kyte protocol header and model name constants.

/// Header carrying the percent-encoded base64 identity.
pub const IDENTITY_HEADER: &str = "x-kyte-identity";
/// Header carrying the lowercase hex request signature.
pub const SIGNATURE_HEADER: &str = "x-kyte-signature";
/// Header carrying the configured application id, when one is set.
pub const APP_ID_HEADER: &str = "x-kyte-appid";

/// Model that exchanges username/password for session credentials.
pub const SESSION_MODEL: &str = "Session";
