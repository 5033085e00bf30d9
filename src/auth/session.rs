//! Session token state shared by every request a client issues.
//!
//! The backend hands out a session token and a transaction token at session
//! establishment. The session token feeds the identity header of every
//! subsequent request; both default to `"0"` before a session exists.

use std::sync::{Mutex, PoisonError};

/// The session/transaction token pair for one client instance.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SessionTokens {
    /// Token identifying the established session
    pub session_token: String,
    /// Token for the next transaction in the session
    pub transaction_token: String,
}

impl Default for SessionTokens {
    fn default() -> Self {
        Self {
            session_token: "0".to_string(),
            transaction_token: "0".to_string(),
        }
    }
}

/// Lock-guarded token storage owned by a client instance.
///
/// Reads (identity derivation) and the single write (session establishment)
/// go through the same lock, so a request can never observe a half-written
/// token pair. The lock is never held across an await point.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    tokens: Mutex<SessionTokens>,
}

impl SessionState {
    /// The current session token.
    pub(crate) fn session_token(&self) -> String {
        self.lock().session_token.clone()
    }

    /// A snapshot of both tokens.
    pub(crate) fn snapshot(&self) -> SessionTokens {
        self.lock().clone()
    }

    /// Overwrite both tokens at once.
    pub(crate) fn store(&self, tokens: SessionTokens) {
        *self.lock() = tokens;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionTokens> {
        // A poisoned lock still holds a complete token pair.
        self.tokens.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_default_to_zero() {
        let state = SessionState::default();
        assert_eq!(state.session_token(), "0");
        assert_eq!(
            state.snapshot(),
            SessionTokens {
                session_token: "0".to_string(),
                transaction_token: "0".to_string(),
            }
        );
    }

    #[test]
    fn test_store_overwrites_both_tokens() {
        let state = SessionState::default();
        state.store(SessionTokens {
            session_token: "abc".to_string(),
            transaction_token: "def".to_string(),
        });

        let tokens = state.snapshot();
        assert_eq!(tokens.session_token, "abc");
        assert_eq!(tokens.transaction_token, "def");
    }

    #[test]
    fn test_instances_are_independent() {
        let first = SessionState::default();
        let second = SessionState::default();

        first.store(SessionTokens {
            session_token: "abc".to_string(),
            transaction_token: "def".to_string(),
        });

        assert_eq!(second.session_token(), "0");
    }
}
