//! Client-side result handling: the store of the current search plus the
//! facets, secondary filters and sort order derived from it.

pub mod facets;
pub mod filters;
pub mod sort;
pub mod store;

pub use facets::{split_type_line, FacetIndex};
pub use filters::{FacetCategory, FilterKey, FilterState, SecondaryFilterState};
pub use sort::{SortDirection, SortKey};
pub use store::ResultStore;
