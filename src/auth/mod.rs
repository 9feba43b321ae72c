//! Authentication and authorization.
//!
//! This module provides password hashing, bearer token handling,
//! credential checking and the access-control policy.

mod error;
mod login;
mod password;
mod policy;
mod token;

pub use error::AuthError;
pub use login::check_credentials;
pub use password::{hash_password, needs_rehash, verify_password, PasswordError};
pub use policy::{
    require_admin, require_self_or_admin, Access, AuthContext, ADMIN_REQUIRED,
    OWNER_OR_ADMIN_REQUIRED,
};
pub use token::{TokenClaims, TokenService};
