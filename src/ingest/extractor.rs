//! Notes-to-cards extraction
//!
//! Four strategies run in priority order and their candidates are pooled:
//! explicit `Q:`/`A:` pairs, `Term: definition` lines, headings with the line
//! under them, and finally one card per sentence. Duplicates (by card
//! identity) are dropped, first occurrence wins, and the result is capped.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::deck::Card;
use crate::error::{StudyError, StudyResult};

pub const MAX_CARDS: usize = 60;
pub const MAX_SENTENCES: usize = 30;
const MIN_SENTENCE_CHARS: usize = 16;
const HEADING_ANSWER_CHARS: usize = 240;
const SENTENCE_ANSWER_CHARS: usize = 220;

static QUESTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^q\s*[:\-]\s*(.*)$").expect("valid question regex"));
static ANSWER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^a\s*[:\-]\s*(.*)$").expect("valid answer regex"));
static TERM_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.{2,80}?)[:\-–—]+\s+(.{3,})$").expect("valid term regex"));
static HASH_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}\s+(.+)$").expect("valid heading regex"));
static BOLD_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*(.+?)\*\*$").expect("valid heading regex"));
static EMPHASIS_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*([^*].*?)\*$").expect("valid heading regex"));

/// Which pass produced a card; stored as the card's tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    ExplicitQa,
    TermDefinition,
    Heading,
    Sentence,
}

impl Strategy {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ExplicitQa => "qa",
            Self::TermDefinition => "definition",
            Self::Heading => "heading",
            Self::Sentence => "sentence",
        }
    }

    fn card(self, question: String, answer: String) -> Card {
        Card::new(question, answer).with_tag(self.label())
    }
}

/// Turn free-text notes into cards.
///
/// Blank notes are rejected; notes that yield nothing report
/// [`StudyError::NoCardsExtracted`] rather than inventing placeholder cards.
pub fn extract_cards(text: &str) -> StudyResult<Vec<Card>> {
    if text.trim().is_empty() {
        return Err(StudyError::InputRejected(
            "Notes are empty. Paste or type some notes first.".to_string(),
        ));
    }

    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut consumed = vec![false; lines.len()];

    let mut candidates = explicit_pairs(&lines, &mut consumed);
    candidates.extend(term_definitions(&lines, &consumed));
    candidates.extend(headings(&lines, &consumed));
    candidates.extend(sentences(text));

    let pooled = candidates.len();
    let mut seen = HashSet::new();
    let cards: Vec<Card> = candidates
        .into_iter()
        .filter(|card| seen.insert(card.id()))
        .take(MAX_CARDS)
        .collect();

    tracing::debug!(candidates = pooled, kept = cards.len(), "extracted cards from notes");

    if cards.is_empty() {
        return Err(StudyError::NoCardsExtracted);
    }

    Ok(cards)
}

fn is_marker_line(line: &str) -> bool {
    QUESTION_LINE.is_match(line) || ANSWER_LINE.is_match(line)
}

/// `Q:` line immediately followed by an `A:` line
fn explicit_pairs(lines: &[&str], consumed: &mut [bool]) -> Vec<Card> {
    let mut cards = Vec::new();
    let mut i = 0;

    while i + 1 < lines.len() {
        let pair = QUESTION_LINE
            .captures(lines[i])
            .zip(ANSWER_LINE.captures(lines[i + 1]));

        if let Some((q, a)) = pair {
            let question = q[1].trim();
            let answer = a[1].trim();
            if !question.is_empty() && !answer.is_empty() {
                cards.push(Strategy::ExplicitQa.card(question.to_string(), answer.to_string()));
            }
            consumed[i] = true;
            consumed[i + 1] = true;
            i += 2;
        } else {
            i += 1;
        }
    }

    cards
}

fn term_definitions(lines: &[&str], consumed: &[bool]) -> Vec<Card> {
    lines
        .iter()
        .zip(consumed)
        .filter(|(line, used)| !**used && !is_marker_line(line))
        .filter_map(|(line, _)| {
            let caps = TERM_LINE.captures(line)?;
            let term = caps[1].trim();
            let definition = caps[2].trim();
            (!term.is_empty() && definition.chars().count() >= 3).then(|| {
                Strategy::TermDefinition.card(format!("What is {}?", term), definition.to_string())
            })
        })
        .collect()
}

fn heading_text(line: &str) -> Option<&str> {
    let caps = HASH_HEADING
        .captures(line)
        .or_else(|| BOLD_HEADING.captures(line))
        .or_else(|| EMPHASIS_HEADING.captures(line))?;
    let text = caps.get(1)?.as_str().trim_end_matches('#').trim();
    (!text.is_empty()).then_some(text)
}

/// Heading line paired with the line right after it
fn headings(lines: &[&str], consumed: &[bool]) -> Vec<Card> {
    let mut cards = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if consumed[i] {
            continue;
        }
        let Some(title) = heading_text(line) else {
            continue;
        };
        let Some(next) = lines.get(i + 1).filter(|next| !next.is_empty()) else {
            continue;
        };
        if consumed[i + 1] {
            continue;
        }

        cards.push(Strategy::Heading.card(
            format!("Explain: {}", title),
            truncate_chars(next, HEADING_ANSWER_CHARS),
        ));
    }

    cards
}

fn sentences(text: &str) -> Vec<Card> {
    let flat = text.replace(['\r', '\n'], " ");

    split_sentences(&flat)
        .into_iter()
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .take(MAX_SENTENCES)
        .enumerate()
        .filter_map(|(i, sentence)| {
            let first_word: String = sentence
                .split_whitespace()
                .next()?
                .chars()
                .filter(|c| c.is_alphanumeric() || matches!(*c, '-' | '(' | ')'))
                .collect();
            (!first_word.is_empty()).then(|| {
                Strategy::Sentence.card(
                    format!("Card {}: {} …?", i + 1, first_word),
                    truncate_chars(sentence, SENTENCE_ANSWER_CHARS),
                )
            })
        })
        .collect()
}

/// Split after `.`, `!` or `?` when whitespace follows
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let at_boundary = matches!(c, '.' | '!' | '?')
            && chars.peek().is_some_and(|(_, next)| next.is_whitespace());
        if at_boundary {
            let end = i + c.len_utf8();
            sentences.push(text[start..end].trim());
            start = end;
        }
    }
    sentences.push(text[start..].trim());

    sentences.retain(|s| !s.is_empty());
    sentences
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Deck;

    fn questions(cards: &[Card]) -> Vec<&str> {
        cards.iter().map(|c| c.question.as_str()).collect()
    }

    #[test]
    fn test_explicit_pair_only() {
        let cards = extract_cards("Q: What is 2+2?\nA: 4").unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "What is 2+2?");
        assert_eq!(cards[0].answer, "4");
        assert!(cards[0].tags.contains("qa"));
    }

    #[test]
    fn test_explicit_markers_are_case_insensitive() {
        let cards = extract_cards("q- Capital of France\na - Paris").unwrap();
        assert_eq!(cards[0].question, "Capital of France");
        assert_eq!(cards[0].answer, "Paris");
    }

    #[test]
    fn test_question_without_answer_line_is_not_paired() {
        let cards = extract_cards("Q: lonely question\nsomething else").unwrap_or_default();
        assert!(cards.iter().all(|c| !c.tags.contains("qa")));
    }

    #[test]
    fn test_term_definition() {
        let cards = extract_cards("Mitosis: cell division").unwrap();
        let card = cards
            .iter()
            .find(|c| c.tags.contains("definition"))
            .unwrap();
        assert_eq!(card.question, "What is Mitosis?");
        assert_eq!(card.answer, "cell division");
    }

    #[test]
    fn test_term_definition_dash_separators() {
        let cards = extract_cards("Photosynthesis — plants make glucose\nCAC - cost per customer")
            .unwrap();
        let defs: Vec<&Card> = cards
            .iter()
            .filter(|c| c.tags.contains("definition"))
            .collect();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].question, "What is Photosynthesis?");
        assert_eq!(defs[1].question, "What is CAC?");
        assert_eq!(defs[1].answer, "cost per customer");
    }

    #[test]
    fn test_short_definition_is_ignored() {
        let cards = extract_cards("Pi: 3\nThis sentence is long enough to become a card.").unwrap();
        assert!(cards.iter().all(|c| !c.tags.contains("definition")));
    }

    #[test]
    fn test_term_length_bounds() {
        let definitions = |text: &str| -> Vec<Card> {
            extract_cards(text)
                .unwrap_or_default()
                .into_iter()
                .filter(|c| c.tags.contains("definition"))
                .collect()
        };

        let longest = "a".repeat(80);
        let defs = definitions(&format!("{}: something long", longest));
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].question, format!("What is {}?", longest));

        let too_long = "a".repeat(81);
        assert!(definitions(&format!("{}: something long", too_long)).is_empty());

        assert!(definitions("X: something").is_empty());
    }

    #[test]
    fn test_headings_pair_with_next_line() {
        let text = "# Cell Biology\nCells are the basic unit of life\n\n**Atoms**\nSmallest unit of matter\n*Empty*\n";
        let cards = extract_cards(text).unwrap();
        let heads: Vec<&Card> = cards.iter().filter(|c| c.tags.contains("heading")).collect();

        assert_eq!(heads.len(), 2);
        assert_eq!(heads[0].question, "Explain: Cell Biology");
        assert_eq!(heads[0].answer, "Cells are the basic unit of life");
        assert_eq!(heads[1].question, "Explain: Atoms");
    }

    #[test]
    fn test_heading_answer_truncated() {
        let long = "x".repeat(300);
        let cards = extract_cards(&format!("## Long\n{}", long)).unwrap();
        let head = cards.iter().find(|c| c.tags.contains("heading")).unwrap();
        assert_eq!(head.answer.chars().count(), 240);
    }

    #[test]
    fn test_sentence_answer_truncated() {
        let text = format!("The {}end.", "word ".repeat(60));
        let cards = extract_cards(&text).unwrap();
        let sentence = cards.iter().find(|c| c.tags.contains("sentence")).unwrap();

        assert_eq!(sentence.question, "Card 1: The …?");
        assert_eq!(sentence.answer.chars().count(), 220);
        assert_eq!(sentence.answer, text.chars().take(220).collect::<String>());
    }

    #[test]
    fn test_sentence_fallback() {
        let text = "The mitochondria is the powerhouse of the cell. Short one. \
                    \"Enzymes\" speed up chemical reactions in the body!";
        let cards = extract_cards(text).unwrap();

        assert_eq!(
            questions(&cards),
            vec!["Card 1: The …?", "Card 2: Enzymes …?"]
        );
        assert_eq!(
            cards[0].answer,
            "The mitochondria is the powerhouse of the cell."
        );
        assert!(cards.iter().all(|c| c.tags.contains("sentence")));
    }

    #[test]
    fn test_sentence_with_empty_first_word_is_skipped() {
        let cards = extract_cards(
            "»» The story continued for a long while. Another sentence that is long enough.",
        )
        .unwrap();
        assert_eq!(questions(&cards), vec!["Card 2: Another …?"]);
    }

    #[test]
    fn test_sentences_capped_at_thirty() {
        let text: String = (0..40)
            .map(|i| format!("Sentence number {} is long enough. ", i))
            .collect();
        let cards = extract_cards(&text).unwrap();
        assert_eq!(cards.len(), MAX_SENTENCES);
    }

    #[test]
    fn test_total_capped_at_sixty() {
        let text: String = (0..80)
            .map(|i| format!("Q: Question {}\nA: Answer {}\n", i, i))
            .collect();
        let cards = extract_cards(&text).unwrap();
        assert_eq!(cards.len(), MAX_CARDS);
        assert_eq!(cards[0].question, "Question 0");
    }

    #[test]
    fn test_duplicates_dropped_first_wins() {
        let cards = extract_cards("Q: Same\nA: Thing\nQ: Same\nA: Thing").unwrap();
        let pairs = cards.iter().filter(|c| c.tags.contains("qa")).count();
        assert_eq!(pairs, 1);
    }

    #[test]
    fn test_strategy_order_is_preserved() {
        let text = "Osmosis: water movement across a membrane\nQ: What is DNA?\nA: Genetic material";
        let cards = extract_cards(text).unwrap();
        assert!(cards[0].tags.contains("qa"));
        assert!(cards[1].tags.contains("definition"));
    }

    #[test]
    fn test_blank_and_barren_notes() {
        assert!(matches!(
            extract_cards("   \n  "),
            Err(StudyError::InputRejected(_))
        ));
        assert!(matches!(
            extract_cards("tiny\nbits"),
            Err(StudyError::NoCardsExtracted)
        ));
    }

    #[test]
    fn test_second_extraction_adds_nothing_to_deck() {
        let notes = "Q: What is 2+2?\nA: 4\nMitosis: cell division\n# Atoms\nSmallest unit of matter";
        let mut deck = Deck::default();

        let first = deck.merge(extract_cards(notes).unwrap());
        assert!(first > 0);
        let second = deck.merge(extract_cards(notes).unwrap());
        assert_eq!(second, 0);
        assert_eq!(deck.len(), first);
    }

    #[test]
    fn test_split_sentences() {
        assert_eq!(
            split_sentences("One. Two!  Three? Four"),
            vec!["One.", "Two!", "Three?", "Four"]
        );
        assert_eq!(split_sentences("Version 2.5 is out."), vec!["Version 2.5 is out."]);
    }
}
