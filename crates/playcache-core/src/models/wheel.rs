use serde::{Deserialize, Serialize};

use super::record::{require_text, ContentRecord, SchemaError};

/// One slice label for the roulette game. Slice colors are assigned
/// client-side when the wheel is built, not stored remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelItemRecord {
    pub id: i64,
    pub text: String,
}

impl ContentRecord for WheelItemRecord {
    const COLLECTION: &'static str = "roulette_items";

    fn id(&self) -> i64 {
        self.id
    }

    fn validate(&self) -> Result<(), SchemaError> {
        require_text(Self::COLLECTION, self.id, "text", &self.text)
    }
}
