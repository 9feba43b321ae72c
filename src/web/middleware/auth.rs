//! Bearer token authentication middleware and extractors.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use crate::auth::{require_admin, AuthContext, AuthError};
use crate::db::{User, UserRepository};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The header must consist of exactly two space-separated parts, the first
/// being `Bearer` and the second a non-empty token.
pub fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingToken)?;
    let value = header.to_str().map_err(|_| AuthError::MalformedAuthHeader)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedAuthHeader),
    }
}

/// Middleware that authenticates every request it wraps.
///
/// On success an [`AuthContext`] carrying the token subject is inserted into
/// the request extensions. The admin flag is left unresolved.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let subject_id = {
        let token = bearer_token(request.headers().get(AUTHORIZATION)).map_err(|e| {
            debug!(path = %request.uri().path(), "Rejected request: {}", e);
            e
        })?;
        state.tokens.verify(token).map_err(|e| {
            debug!(path = %request.uri().path(), "Rejected token: {}", e);
            e
        })?
    };

    request
        .extensions_mut()
        .insert(AuthContext::new(subject_id));
    Ok(next.run(request).await)
}

/// Extractor for authenticated requests.
///
/// Only valid on routes behind [`authenticate`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthContext);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError::from(AuthError::MissingToken))
    }
}

/// Extractor for administrator-only handlers.
///
/// Runs the admin gate against the current user record before the handler
/// body executes, so a denied request never reaches it.
#[derive(Debug, Clone)]
pub struct AdminUser {
    /// Request context, marked admin-verified.
    pub ctx: AuthContext,
    /// The administrator's current record.
    pub user: User,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(mut ctx) = AuthUser::from_request_parts(parts, state).await?;

        let repo = UserRepository::new(state.db.pool());
        let user = require_admin(&repo, &mut ctx).await?;

        parts.extensions.insert(ctx.clone());
        Ok(AdminUser { ctx, user })
    }
}
