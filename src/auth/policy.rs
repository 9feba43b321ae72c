//! Authorization policy.
//!
//! The admin flag is never read from the token. Both gates re-fetch the
//! subject's current record from the credential store, so a role change
//! takes effect on the next request.

use tracing::{debug, warn};

use super::error::AuthError;
use crate::db::{CredentialStore, User};

/// Message returned when the admin gate denies a request.
pub const ADMIN_REQUIRED: &str = "Administrator role required";

/// Message returned when the self-or-admin gate denies a request.
pub const OWNER_OR_ADMIN_REQUIRED: &str = "You can only modify your own account";

/// Request-scoped identity attached by the authentication middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Authenticated user ID, taken from the token.
    pub subject_id: i64,
    /// Admin flag once resolved by a policy check.
    pub admin: Option<bool>,
}

impl AuthContext {
    /// Create a context with an unresolved admin flag.
    pub fn new(subject_id: i64) -> Self {
        Self {
            subject_id,
            admin: None,
        }
    }
}

/// How the self-or-admin gate let a request through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The subject is an administrator.
    Admin,
    /// The subject targets its own record.
    Owner,
}

/// Permit only administrators.
///
/// Returns the subject's current record and marks the context admin-verified.
pub async fn require_admin<S>(store: &S, ctx: &mut AuthContext) -> Result<User, AuthError>
where
    S: CredentialStore + ?Sized,
{
    match store.find_by_id(ctx.subject_id).await? {
        Some(user) if user.is_admin => {
            ctx.admin = Some(true);
            Ok(user)
        }
        Some(_) => {
            ctx.admin = Some(false);
            warn!(subject_id = ctx.subject_id, "Admin gate denied");
            Err(AuthError::Forbidden(ADMIN_REQUIRED.to_string()))
        }
        None => {
            ctx.admin = Some(false);
            warn!(subject_id = ctx.subject_id, "Admin gate denied: subject no longer exists");
            Err(AuthError::Forbidden(ADMIN_REQUIRED.to_string()))
        }
    }
}

/// Permit administrators on any target, everyone else only on themselves.
pub async fn require_self_or_admin<S>(
    store: &S,
    ctx: &mut AuthContext,
    target_id: i64,
) -> Result<Access, AuthError>
where
    S: CredentialStore + ?Sized,
{
    let is_admin = store
        .find_by_id(ctx.subject_id)
        .await?
        .map(|user| user.is_admin)
        .unwrap_or(false);
    ctx.admin = Some(is_admin);

    if is_admin {
        debug!(subject_id = ctx.subject_id, target_id, "Access granted as admin");
        return Ok(Access::Admin);
    }
    if ctx.subject_id == target_id {
        return Ok(Access::Owner);
    }

    warn!(subject_id = ctx.subject_id, target_id, "Self-or-admin gate denied");
    Err(AuthError::Forbidden(OWNER_OR_ADMIN_REQUIRED.to_string()))
}
