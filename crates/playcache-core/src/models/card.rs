use serde::{Deserialize, Serialize};

use super::record::{require_text, ContentRecord, SchemaError};

/// One matchable concept in the memory game. The UI expands each record
/// into two card faces sharing this record's `id` as their match key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPairRecord {
    pub id: i64,
    pub text: String,
}

impl ContentRecord for CardPairRecord {
    const COLLECTION: &'static str = "memory_card_pairs";

    fn id(&self) -> i64 {
        self.id
    }

    fn validate(&self) -> Result<(), SchemaError> {
        require_text(Self::COLLECTION, self.id, "text", &self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_non_empty_text() {
        let record = CardPairRecord {
            id: 1,
            text: "Safety goggles".to_string(),
        };
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_text() {
        let record = CardPairRecord {
            id: 3,
            text: "   ".to_string(),
        };
        assert_eq!(
            record.validate(),
            Err(SchemaError::EmptyField {
                collection: "memory_card_pairs",
                id: 3,
                field: "text",
            })
        );
    }
}
