//! Web API module for the dealership service.
//!
//! This module provides the JSON REST API: authentication, user management,
//! the vehicle catalog and sales, plus the OpenAPI document.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use openapi::ApiDoc;
pub use router::create_router;
pub use server::WebServer;
