//! hopper-postgres - PostgreSQL-backed entry store.
//!
//! Entries live in a single `entries` table (see `schema.sql`). Categories
//! are expected to be stored lowercased, matching the encoded predicate.

mod sql;
mod store;

pub use store::PgStore;
