//! Authentication and authorization failures.

use thiserror::Error;

/// Reasons a request is rejected before reaching its handler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header was sent.
    #[error("authorization token not provided")]
    MissingToken,

    /// The header is not of the form `Bearer <token>`.
    #[error("malformed authorization header")]
    MalformedAuthHeader,

    /// The token signature is valid but its expiry has passed.
    #[error("token expired")]
    ExpiredToken,

    /// Bad signature or malformed token.
    #[error("token verification failed")]
    InvalidToken,

    /// Role or ownership denial.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The credential store could not be consulted.
    #[error("internal failure: {0}")]
    Internal(String),
}

impl From<crate::DealershipError> for AuthError {
    fn from(e: crate::DealershipError) -> Self {
        AuthError::Internal(e.to_string())
    }
}
