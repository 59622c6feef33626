//! Category predicates and range-query shapes.
//!
//! Stores receive a [`RangeQuery`] and decide how to execute it. Nothing in
//! here knows about SQL.

mod category;
mod plan;

pub use category::CategoryPredicate;
pub use plan::{RangeQuery, RangeShape, SortOrder};
