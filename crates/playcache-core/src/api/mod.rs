//! Remote content service client.
//!
//! This module provides the `ContentClient` for reading and editing the
//! hosted content collections that back each game, plus the `ApiError`
//! taxonomy used when a request fails.

pub mod client;
pub mod error;

pub use client::ContentClient;
pub use error::ApiError;
