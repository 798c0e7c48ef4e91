//! Local content store for offline play.
//!
//! This module provides the `ContentStore`, a per-collection JSON store
//! that holds the records from the most recent successful remote fetch.
//! It is a full-replacement mirror: every save discards the previous
//! contents of a collection before writing the new set.

pub mod store;

pub use store::{CacheAges, CachedData, ContentStore};
