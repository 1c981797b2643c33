//! Cards and the deck that owns them

pub mod identity;
pub mod interchange;

pub use identity::CardId;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

pub const DEFAULT_DECK_TITLE: &str = "StudyPal Deck";

/// A single question/answer flashcard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Card {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Identity derived from question and answer; tags never affect it
    pub fn id(&self) -> CardId {
        CardId::derive(&self.question, &self.answer)
    }
}

/// Ordered cards plus the notes text that last produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub title: String,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub notes: String,
}

impl Default for Deck {
    fn default() -> Self {
        Self {
            title: DEFAULT_DECK_TITLE.to_string(),
            cards: Vec::new(),
            notes: String::new(),
        }
    }
}

impl Deck {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Append incoming cards whose identity is not already in the deck.
    /// Returns the number of cards added.
    pub fn merge(&mut self, incoming: impl IntoIterator<Item = Card>) -> usize {
        let mut known: HashSet<CardId> = self.cards.iter().map(Card::id).collect();
        let before = self.cards.len();

        for card in incoming {
            if known.insert(card.id()) {
                self.cards.push(card);
            }
        }

        self.cards.len() - before
    }

    /// Replace every card, keeping the first of any identity duplicates
    pub fn replace_cards(&mut self, cards: impl IntoIterator<Item = Card>) -> usize {
        self.cards.clear();
        self.merge(cards)
    }

    /// Every answer in deck order, for building multiple-choice options
    pub fn answers(&self) -> Vec<String> {
        self.cards.iter().map(|c| c.answer.clone()).collect()
    }

    /// Rewrite a card's text. Tags are kept; the identity changes.
    pub fn edit(&mut self, index: usize, question: &str, answer: &str) -> bool {
        match self.cards.get_mut(index) {
            Some(card) => {
                card.question = question.trim().to_string();
                card.answer = answer.trim().to_string();
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, index: usize) -> Option<Card> {
        (index < self.cards.len()).then(|| self.cards.remove(index))
    }

    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.cards.len() {
            return false;
        }
        self.cards.swap(index - 1, index);
        true
    }

    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.cards.len() {
            return false;
        }
        self.cards.swap(index, index + 1);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_deck() -> Deck {
        Deck {
            cards: vec![
                Card::new("Q1", "A1"),
                Card::new("Q2", "A2"),
                Card::new("Q3", "A3"),
            ],
            ..Deck::default()
        }
    }

    #[test]
    fn test_tags_do_not_affect_identity() {
        let plain = Card::new("What is Mitosis?", "cell division");
        let tagged = plain.clone().with_tag("definition");
        assert_eq!(plain.id(), tagged.id());
    }

    #[test]
    fn test_merge_skips_known_identities() {
        let mut deck = sample_deck();
        let added = deck.merge(vec![
            Card::new("Q1", "A1").with_tag("auto"),
            Card::new("Q4", "A4"),
            Card::new("Q4", "A4"),
        ]);
        assert_eq!(added, 1);
        assert_eq!(deck.len(), 4);
        assert_eq!(deck.cards[3].question, "Q4");
    }

    #[test]
    fn test_replace_cards_dedupes() {
        let mut deck = sample_deck();
        let added = deck.replace_cards(vec![Card::new("X", "Y"), Card::new("X", "Y")]);
        assert_eq!(added, 1);
        assert_eq!(deck.cards, vec![Card::new("X", "Y")]);
    }

    #[test]
    fn test_edit_changes_identity() {
        let mut deck = sample_deck();
        let before = deck.cards[0].id();
        assert!(deck.edit(0, " New question ", "A1"));
        assert_eq!(deck.cards[0].question, "New question");
        assert_ne!(deck.cards[0].id(), before);
        assert!(!deck.edit(9, "x", "y"));
    }

    #[test]
    fn test_delete_and_reorder() {
        let mut deck = sample_deck();
        assert!(deck.move_up(2));
        assert_eq!(deck.cards[1].question, "Q3");
        assert!(deck.move_down(0));
        assert_eq!(deck.cards[0].question, "Q3");
        assert!(!deck.move_up(0));
        assert!(!deck.move_down(2));

        let removed = deck.delete(1).unwrap();
        assert_eq!(removed.question, "Q1");
        assert_eq!(deck.len(), 2);
        assert!(deck.delete(5).is_none());
    }
}
