//! Data models for the game hub content collections.
//!
//! Each game pulls its editable content from one remote collection:
//!
//! - `CardPairRecord`: matchable concepts for the memory game
//! - `PhraseRecord`: clue/answer entries for the guess-or-leave game
//! - `WheelItemRecord`: slice labels for the roulette game
//!
//! All records implement [`ContentRecord`], which ties a type to its
//! collection name and validates it at the remote-service boundary.

pub mod card;
pub mod phrase;
pub mod record;
pub mod wheel;

pub use card::CardPairRecord;
pub use phrase::{themes, PhraseRecord};
pub use record::{validate_collection, ContentRecord, SchemaError};
pub use wheel::WheelItemRecord;
