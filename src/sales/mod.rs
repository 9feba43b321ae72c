//! Sales records.

mod repository;
mod types;

pub use repository::SaleRepository;
pub use types::{NewSale, Sale, SaleDetail, SaleUpdate};
