//! Data Transfer Objects for Web API.

mod pagination;
pub mod request;
pub mod response;
pub mod validation;

pub use pagination::Pagination;
pub use request::*;
pub use response::*;
pub use validation::ValidatedJson;
