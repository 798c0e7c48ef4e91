use serde::{Deserialize, Serialize};

use super::record::{require_text, ContentRecord, SchemaError};

/// One clue/answer entry for the guess-or-leave game.
///
/// `theme` is a grouping key shared by several records; `phrase` is the clue
/// shown to players and `word` is the answer they must guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseRecord {
    pub id: i64,
    pub theme: String,
    pub phrase: String,
    pub word: String,
}

impl ContentRecord for PhraseRecord {
    const COLLECTION: &'static str = "guess_or_leave_phrases";

    fn id(&self) -> i64 {
        self.id
    }

    fn validate(&self) -> Result<(), SchemaError> {
        require_text(Self::COLLECTION, self.id, "theme", &self.theme)?;
        require_text(Self::COLLECTION, self.id, "phrase", &self.phrase)?;
        require_text(Self::COLLECTION, self.id, "word", &self.word)
    }
}

/// Distinct themes in first-appearance order, for grouped display.
pub fn themes(records: &[PhraseRecord]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for record in records {
        if !out.contains(&record.theme.as_str()) {
            out.push(&record.theme);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, theme: &str) -> PhraseRecord {
        PhraseRecord {
            id,
            theme: theme.to_string(),
            phrase: "Protects your head on construction sites.".to_string(),
            word: "Helmet".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_record() {
        assert!(record(1, "PPE").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_word() {
        let mut bad = record(2, "PPE");
        bad.word = String::new();
        assert_eq!(
            bad.validate(),
            Err(SchemaError::EmptyField {
                collection: "guess_or_leave_phrases",
                id: 2,
                field: "word",
            })
        );
    }

    #[test]
    fn test_themes_are_deduplicated_in_order() {
        let records = vec![record(1, "PPE"), record(2, "Fire"), record(3, "PPE")];
        assert_eq!(themes(&records), vec!["PPE", "Fire"]);
    }
}
