//! API handlers.

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod install;
pub mod sales;
pub mod user;

pub use admin::*;
pub use auth::*;
pub use catalog::*;
pub use install::*;
pub use sales::*;
pub use user::*;

use crate::auth::TokenService;
use crate::web::error::ApiError;
use crate::Database;

/// Application state shared across handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool.
    pub db: Database,
    /// Token issuer and verifier.
    pub tokens: TokenService,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, tokens: TokenService) -> Self {
        Self { db, tokens }
    }
}

/// Hash a password for storage, hiding hasher failures from the client.
pub(crate) fn hash_for_storage(password: &str) -> Result<String, ApiError> {
    crate::auth::hash_password(password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        ApiError::internal("Failed to hash password")
    })
}
