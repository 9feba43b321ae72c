//! Pagination extractor for list endpoints.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use super::request::{PaginationQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::web::error::ApiError;

/// Resolved page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-based).
    pub page: i64,
    /// Items per page.
    pub limit: i64,
}

impl Pagination {
    /// Row offset of the first item on this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl TryFrom<PaginationQuery> for Pagination {
    type Error = ApiError;

    fn try_from(query: PaginationQuery) -> Result<Self, Self::Error> {
        let page = query.page.unwrap_or(1);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);

        if page < 1 {
            return Err(ApiError::bad_request("page must be at least 1"));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(ApiError::bad_request(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok(Self { page, limit })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PaginationQuery>::try_from_uri(&parts.uri)
            .map_err(|e| ApiError::bad_request(format!("Invalid pagination: {}", e.body_text())))?;
        Pagination::try_from(query)
    }
}
