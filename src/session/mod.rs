//! Session token storage.
//!
//! The session collaborator is the durable owner of the OAuth2 token pair;
//! the engine only ever reads the current pair at call start and writes a
//! replacement after a successful refresh. That contract is the
//! [`SessionStore`] trait; [`MemorySession`] is the in-process
//! implementation used by the CLI and the test suite.

use std::sync::RwLock;

/// An access/refresh token pair issued by the OAuth2 provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Bearer token attached to API requests.
    pub access_token: String,
    /// Token exchanged for a new pair when the access token expires.
    pub refresh_token: String,
}

/// Narrow contract to the session collaborator.
///
/// A store shared across concurrent calls must make a `store` visible to
/// subsequent `tokens` reads (last writer wins); the engine adds a
/// single-flight guard around refresh on top of this, so implementations do
/// not need their own refresh coordination.
pub trait SessionStore: Send + Sync {
    /// The current token pair for the active session, if any.
    fn tokens(&self) -> Option<TokenPair>;

    /// Persists a newly issued pair, replacing the previous one.
    fn store(&self, tokens: TokenPair);
}

/// In-memory session store.
///
/// Backed by an `RwLock`; writes are last-writer-wins, which matches the
/// upstream token endpoint's behavior of invalidating older refresh tokens.
#[derive(Debug, Default)]
pub struct MemorySession {
    tokens: RwLock<Option<TokenPair>>,
}

impl MemorySession {
    /// Creates a session holding the given pair.
    pub fn new(tokens: TokenPair) -> Self {
        Self {
            tokens: RwLock::new(Some(tokens)),
        }
    }

    /// Creates a session with no tokens (requests will fail fast with an
    /// authentication error).
    pub fn empty() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn tokens(&self) -> Option<TokenPair> {
        self.tokens
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn store(&self, tokens: TokenPair) {
        *self
            .tokens
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(tokens);
    }
}
