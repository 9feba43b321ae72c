//! Dealership - vehicle dealership REST API
//!
//! Users, brands, models, cars and sales stored in SQLite and served over a
//! JSON API behind bearer-token authentication.
//!
//! ```
//! let hash = dealership::hash_password("correct horse").unwrap();
//! assert!(dealership::verify_password("correct horse", &hash).unwrap());
//! ```

pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod install;
pub mod logging;
pub mod sales;
pub mod web;

pub use auth::{hash_password, verify_password, AuthError, PasswordError, TokenService};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository, UserUpdate};
pub use error::{DealershipError, Result};
