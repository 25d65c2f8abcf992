//! Request/response query modules.
//!
//! Each module provides a query struct that borrows a
//! [`Connection`](crate::connection::Connection) and exposes async methods
//! returning `Result<T>` with typed payloads.

pub mod cards;
pub mod catalogs;

pub use cards::{summarize_prices, CardQuery, PriceSummary};
pub use catalogs::{Catalog, CatalogQuery, TypeVocabulary};
