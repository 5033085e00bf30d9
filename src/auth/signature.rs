//! Identity and signature derivation for Kyte API authentication.
//!
//! Every request carries two headers derived here:
//! ```text
//! x-kyte-identity  = urlencode(base64(publicKey % sessionToken % timestamp % account))
//! x-kyte-signature = hex(HMAC(HMAC(HMAC(privateKey, "0"), identifier), epoch))
//! ```
//!
//! The signature is a three-level HMAC-SHA256 chain: each level narrows the
//! signing scope (account secret, then application identifier, then a
//! second-granularity epoch), so a signature is valid for exactly one
//! identifier and one second.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::form_urlencoded;

use crate::auth::Credentials;
use crate::error::KyteError;

type HmacSha256 = Hmac<Sha256>;

/// First message of the signing chain.
///
/// The backend derives the first key from this fixed placeholder, not from
/// the transaction token issued at session establishment. Substituting the
/// live token breaks backend-side signature verification.
pub const TRANSACTION_TOKEN_PLACEHOLDER: &str = "0";

/// Build the `x-kyte-identity` header value.
///
/// Joins the components with literal `%` separators (no escaping), encodes
/// the result with standard base64 and percent-encodes that for safe header
/// inclusion.
///
/// # Example
///
/// ```rust
/// use kyte_api_client::auth::identity_header;
///
/// let identity = identity_header("pk", "0", "Wed, 14 Aug 2024 12:00:00 GMT", "acct");
/// assert!(!identity.contains('+') && !identity.contains('='));
/// ```
pub fn identity_header(
    public_key: &str,
    session_token: &str,
    timestamp: &str,
    account: &str,
) -> String {
    let plaintext = format!("{public_key}%{session_token}%{timestamp}%{account}");
    let encoded = BASE64.encode(plaintext.as_bytes());
    form_urlencoded::byte_serialize(encoded.as_bytes()).collect()
}

/// Sign a request for the given epoch second.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the private key and identifier
/// * `epoch_seconds` - Unix timestamp of the request, second granularity
///
/// # Returns
///
/// The signature as 64 lowercase hex characters.
///
/// # Errors
///
/// Fails with [`KyteError::Auth`] on empty or otherwise unusable key
/// material. This is a configuration error, not transient.
pub fn sign_request(credentials: &Credentials, epoch_seconds: i64) -> Result<String, KyteError> {
    let private_key = credentials.expose_private_key();
    if private_key.is_empty() {
        return Err(KyteError::Auth("private key must not be empty".to_string()));
    }

    let key1 = hmac_sha256(
        private_key.as_bytes(),
        TRANSACTION_TOKEN_PLACEHOLDER.as_bytes(),
    )?;
    let key2 = hmac_sha256(&key1, credentials.identifier.as_bytes())?;
    let signature = hmac_sha256(&key2, epoch_seconds.to_string().as_bytes())?;

    Ok(hex::encode(signature))
}

fn hmac_sha256(key: &[u8], message: &[u8]) -> Result<[u8; 32], KyteError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| KyteError::Auth(format!("Invalid HMAC key: {e}")))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percent_decode(encoded: &str) -> String {
        let query = format!("v={encoded}");
        let (_, value) = form_urlencoded::parse(query.as_bytes()).next().unwrap();
        value.into_owned()
    }

    fn test_credentials() -> Credentials {
        Credentials::new("pk_test", "sk_test", "acct_test", "ident_test")
    }

    #[test]
    fn test_hmac_sha256_rfc4231_vector() {
        // RFC 4231 test case 2.
        let mac = hmac_sha256(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            hex::encode(mac),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_identity_round_trips() {
        let identity = identity_header("pk", "sess", "Wed, 14 Aug 2024 12:00:00 GMT", "acct");

        let base64_text = percent_decode(&identity);
        let plaintext = String::from_utf8(BASE64.decode(&base64_text).unwrap()).unwrap();
        assert_eq!(plaintext, "pk%sess%Wed, 14 Aug 2024 12:00:00 GMT%acct");
    }

    #[test]
    fn test_identity_is_header_safe() {
        // The timestamp's spaces and the base64 alphabet's +/= must not
        // survive percent-encoding.
        let identity = identity_header("pk+/", "0", "Wed, 14 Aug 2024 12:00:00 GMT", "acct");
        assert!(!identity.contains('+'));
        assert!(!identity.contains('/'));
        assert!(!identity.contains('='));
        assert!(!identity.contains(' '));
    }

    #[test]
    fn test_identity_deterministic() {
        let a = identity_header("pk", "sess", "ts", "acct");
        let b = identity_header("pk", "sess", "ts", "acct");
        assert_eq!(a, b);
    }

    #[test]
    fn test_identity_depends_on_session_token() {
        let a = identity_header("pk", "sess_a", "ts", "acct");
        let b = identity_header("pk", "sess_b", "ts", "acct");
        assert_ne!(a, b);
    }

    #[test]
    fn test_signature_shape() {
        let signature = sign_request(&test_credentials(), 1723636800).unwrap();
        assert_eq!(signature.len(), 64);
        assert!(
            signature
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_signature_deterministic() {
        let a = sign_request(&test_credentials(), 1723636800).unwrap();
        let b = sign_request(&test_credentials(), 1723636800).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_changes_with_each_input() {
        let base = sign_request(&test_credentials(), 1723636800).unwrap();

        let other_key = Credentials::new("pk_test", "sk_other", "acct_test", "ident_test");
        assert_ne!(sign_request(&other_key, 1723636800).unwrap(), base);

        let other_ident = Credentials::new("pk_test", "sk_test", "acct_test", "ident_other");
        assert_ne!(sign_request(&other_ident, 1723636800).unwrap(), base);

        assert_ne!(sign_request(&test_credentials(), 1723636801).unwrap(), base);
    }

    #[test]
    fn test_signature_ignores_account_and_public_key() {
        // Only the private key, identifier and epoch feed the chain; the
        // session token is not an input at all, so session establishment
        // leaves signatures unchanged.
        let base = sign_request(&test_credentials(), 1723636800).unwrap();
        let other = Credentials::new("pk_other", "sk_test", "acct_other", "ident_test");
        assert_eq!(sign_request(&other, 1723636800).unwrap(), base);
    }

    #[test]
    fn test_signature_matches_manual_chain() {
        let credentials = test_credentials();
        let key1 = hmac_sha256(b"sk_test", b"0").unwrap();
        let key2 = hmac_sha256(&key1, b"ident_test").unwrap();
        let expected = hex::encode(hmac_sha256(&key2, b"1723636800").unwrap());

        assert_eq!(sign_request(&credentials, 1723636800).unwrap(), expected);
    }

    #[test]
    fn test_empty_private_key_rejected() {
        let credentials = Credentials::new("pk", "", "acct", "ident");
        assert!(matches!(
            sign_request(&credentials, 1723636800),
            Err(KyteError::Auth(_))
        ));
    }
}
