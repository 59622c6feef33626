//! Cursor pagination and navigation links.
//!
//! A request flows through the [`CursorResolver`], which reads the primary
//! page and the auxiliary rows behind the `next` and `last` links, and then
//! through [`assemble`](assembler::assemble), which hands the result to the
//! [`LinkBuilder`].

mod assembler;
mod instrument;
mod links;
mod page;
mod request;
mod resolver;

pub use assembler::LogFeedSource;
pub use instrument::Instrumented;
pub use links::LinkBuilder;
pub use page::{Link, Page, Relation};
pub use request::{DEFAULT_PAGE_SIZE, FeedQueryParams, FeedRequest};
pub use resolver::{CursorResolver, ResolvedPage, last_page_size};
