//! Credential store abstraction.
//!
//! The authentication layer only needs a handful of lookups, so it depends
//! on this trait instead of the concrete repository. Tests plug in an
//! in-memory store.

use async_trait::async_trait;

use super::repository::UserRepository;
use super::user::User;
use crate::Result;

/// Lookup and rehash operations used by login and authorization.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Find a user by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Replace a stored password hash.
    async fn update_password_hash(&self, id: i64, password_hash: &str) -> Result<bool>;
}

#[async_trait]
impl CredentialStore for UserRepository<'_> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_by_email(email).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_by_id(id).await
    }

    async fn update_password_hash(&self, id: i64, password_hash: &str) -> Result<bool> {
        self.update_password(id, password_hash).await
    }
}
