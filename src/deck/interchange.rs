//! Deck import/export file format
//!
//! ```json
//! { "deck_title": "Biology", "cards": [ { "q": "...", "a": "...", "tags": ["..."] } ] }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

use super::{Card, Deck};
use crate::error::{StudyError, StudyResult};

#[derive(Debug, Serialize, Deserialize)]
struct DeckFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deck_title: Option<String>,
    cards: Vec<FileCard>,
}

#[derive(Debug, Serialize, Deserialize)]
struct FileCard {
    q: String,
    a: String,
    #[serde(default)]
    tags: Vec<String>,
}

impl From<FileCard> for Card {
    fn from(card: FileCard) -> Self {
        Card {
            question: card.q,
            answer: card.a,
            tags: card.tags.into_iter().collect::<BTreeSet<_>>(),
        }
    }
}

impl From<&Card> for FileCard {
    fn from(card: &Card) -> Self {
        FileCard {
            q: card.question.clone(),
            a: card.answer.clone(),
            tags: card.tags.iter().cloned().collect(),
        }
    }
}

/// Cards and optional title read from a deck file
#[derive(Debug)]
pub struct ImportedDeck {
    pub title: Option<String>,
    pub cards: Vec<Card>,
}

/// Parse a deck file. `cards` must be present and be an array of cards;
/// any other shape is rejected.
pub fn parse_deck_file(json: &str) -> StudyResult<ImportedDeck> {
    let value: Value = serde_json::from_str(json).map_err(StudyError::invalid_deck_file)?;

    match value.get("cards") {
        Some(Value::Array(_)) => {}
        Some(_) => return Err(StudyError::invalid_deck_file("\"cards\" is not a list")),
        None => return Err(StudyError::invalid_deck_file("missing \"cards\"")),
    }

    let file: DeckFile = serde_json::from_value(value).map_err(StudyError::invalid_deck_file)?;

    Ok(ImportedDeck {
        title: file.deck_title.filter(|t| !t.trim().is_empty()),
        cards: file.cards.into_iter().map(Card::from).collect(),
    })
}

/// Apply a parsed file to the deck: cards are replaced, the title only when given.
/// Returns the number of cards now in the deck.
pub fn apply_import(deck: &mut Deck, imported: ImportedDeck) -> usize {
    if let Some(title) = imported.title {
        deck.title = title;
    }
    deck.replace_cards(imported.cards)
}

/// Parse and apply in one step; the deck is untouched on error
pub fn import_into(deck: &mut Deck, json: &str) -> StudyResult<usize> {
    let imported = parse_deck_file(json)?;
    Ok(apply_import(deck, imported))
}

pub fn export_deck(deck: &Deck) -> StudyResult<String> {
    let file = DeckFile {
        deck_title: Some(deck.title.clone()),
        cards: deck.cards.iter().map(FileCard::from).collect(),
    };
    serde_json::to_string_pretty(&file)
        .map_err(|e| StudyError::PersistenceUnavailable(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_valid_file() {
        let json = r#"{
            "deck_title": "Biology",
            "cards": [
                {"q": "What is Mitosis?", "a": "cell division", "tags": ["definition"]},
                {"q": "What is an atom?", "a": "smallest unit of matter"}
            ]
        }"#;

        let mut deck = Deck::default();
        let count = import_into(&mut deck, json).unwrap();

        assert_eq!(count, 2);
        assert_eq!(deck.title, "Biology");
        assert!(deck.cards[0].tags.contains("definition"));
        assert!(deck.cards[1].tags.is_empty());
    }

    #[test]
    fn test_import_without_title_keeps_existing() {
        let mut deck = Deck {
            title: "Mine".to_string(),
            ..Deck::default()
        };
        import_into(&mut deck, r#"{"cards": [{"q": "Q", "a": "A"}]}"#).unwrap();
        assert_eq!(deck.title, "Mine");
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_import_rejects_bad_shapes_and_leaves_deck() {
        let mut deck = Deck::default();
        deck.merge(vec![Card::new("Keep", "me")]);
        let original = deck.clone();

        for bad in [
            "not json",
            r#"{"deck_title": "x"}"#,
            r#"{"cards": "nope"}"#,
            r#"{"cards": [{"question": "wrong keys"}]}"#,
            r#"[1, 2, 3]"#,
        ] {
            let err = import_into(&mut deck, bad).unwrap_err();
            assert!(matches!(err, StudyError::InputRejected(_)), "{}", bad);
            assert_eq!(deck, original);
        }
    }

    #[test]
    fn test_export_then_import_preserves_cards() {
        let mut deck = Deck::default();
        deck.title = "Export me".to_string();
        deck.merge(vec![Card::new("Q", "A").with_tag("qa")]);

        let json = export_deck(&deck).unwrap();
        assert!(json.contains("\"deck_title\""));
        assert!(json.contains("\"q\": \"Q\""));

        let mut other = Deck::default();
        import_into(&mut other, &json).unwrap();
        assert_eq!(other.title, deck.title);
        assert_eq!(other.cards, deck.cards);
    }
}
