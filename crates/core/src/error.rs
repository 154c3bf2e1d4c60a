//! Domain error model.

use thiserror::Error;

/// Result type used across the session domain layer.
pub type SessionResult<T> = Result<T, SessionError>;

/// Domain-level session error.
///
/// Keep this focused on deterministic login/session failures. Storage
/// concerns belong to the infrastructure layer. Nothing here is fatal: every
/// variant resolves to "reject this operation" or "treat as unauthenticated".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The supplied credential failed token-format validation.
    #[error("invalid credential: token failed format validation")]
    InvalidCredential,

    /// The supplied identity carries no role and cannot open a session.
    #[error("invalid identity: missing role")]
    InvalidIdentity,
}
