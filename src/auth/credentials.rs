//! Credential management for Kyte API authentication.

use secrecy::{ExposeSecret, SecretString};

/// API credentials for one Kyte account.
///
/// Supplied once at client construction and immutable thereafter.
#[derive(Clone)]
pub struct Credentials {
    /// The public key (identity component, sent with every request)
    pub public_key: String,
    /// The private key (used for signing, never sent)
    private_key: SecretString,
    /// The account identifier (identity component)
    pub account: String,
    /// The application identifier (signature scope component)
    pub identifier: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(
        public_key: impl Into<String>,
        private_key: impl Into<String>,
        account: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: SecretString::from(private_key.into()),
            account: account.into(),
            identifier: identifier.into(),
        }
    }

    /// Get the private key for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_private_key(&self) -> &str {
        self.private_key.expose_secret()
    }

    /// Create credentials from the default environment variables.
    ///
    /// Reads `KYTE_PUBLIC_KEY`, `KYTE_PRIVATE_KEY`, `KYTE_ACCOUNT` and
    /// `KYTE_IDENTIFIER`.
    ///
    /// # Panics
    ///
    /// Panics if any of the environment variables are not set.
    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_else(|| {
            panic!("KYTE_PUBLIC_KEY, KYTE_PRIVATE_KEY, KYTE_ACCOUNT and KYTE_IDENTIFIER must be set")
        })
    }

    /// Try to create credentials from the default environment variables.
    ///
    /// Returns `None` if any of the environment variables are not set.
    pub fn try_from_env() -> Option<Self> {
        let public_key = std::env::var("KYTE_PUBLIC_KEY").ok()?;
        let private_key = std::env::var("KYTE_PRIVATE_KEY").ok()?;
        let account = std::env::var("KYTE_ACCOUNT").ok()?;
        let identifier = std::env::var("KYTE_IDENTIFIER").ok()?;

        Some(Self::new(public_key, private_key, account, identifier))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .field("account", &self.account)
            .field("identifier", &self.identifier)
            .finish()
    }
}
