//! playcache-core - the offline-first content layer for a casual mini-game
//! hub (memory match, guess-or-leave, roulette).
//!
//! Game content lives in a hosted backend and is mirrored into a local
//! per-collection store after every successful fetch. When the remote
//! service is unreachable, the last-known-good local copy is served
//! instead, so the games keep working offline.
//!
//! - [`models`]: tagged record schemas, validated at the remote boundary
//! - [`api`]: REST client for the hosted content service
//! - [`cache`]: the local full-replacement content store
//! - [`loader`]: fetch-with-fallback orchestration shared by all games
//! - [`deck`]: pure content shaping (decks, hints, wheel geometry)
//! - [`config`]: service coordinates and cache location

pub mod api;
pub mod cache;
pub mod config;
pub mod deck;
pub mod loader;
pub mod models;

pub use api::{ApiError, ContentClient};
pub use cache::{CachedData, ContentStore};
pub use config::Config;
pub use loader::{load_collection, refresh_collection, CollectionData};
