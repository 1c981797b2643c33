use anyhow::Result;
use colored::Colorize;
use inquire::Editor;
use std::path::PathBuf;

use super::{is_cancel, print_study_error};
use crate::deck::Deck;
use crate::error::{StudyError, StudyResult};
use crate::ingest::{extract_cards, read_notes};
use crate::storage::{DeckStore, open_backend};

const NOTES_HELP: &str =
    "\"Q: ...\" / \"A: ...\" pairs, \"Term: definition\" lines, # headings, or plain sentences";

/// Turn notes into cards. Reads `path` when given, otherwise opens an editor
/// seeded with the deck's current notes.
pub fn run(path: Option<PathBuf>, replace: bool) -> Result<()> {
    let backend = open_backend();
    let store = DeckStore::new(backend.as_ref());
    let mut deck = store.load();

    let notes = match path {
        Some(path) => read_notes(&path)?,
        None => {
            let prompt = Editor::new("Edit your notes:")
                .with_predefined_text(&deck.notes)
                .with_file_extension(".md")
                .with_help_message(NOTES_HELP)
                .prompt();

            match prompt {
                Ok(text) => text,
                Err(e) if is_cancel(&e) => {
                    println!("{}", "Cancelled.".dimmed());
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }
        }
    };

    let (found, added) = match apply_notes(&mut deck, notes, replace) {
        Ok(counts) => counts,
        Err(e) => {
            // the notes were kept, so the next edit starts from them
            if matches!(e, StudyError::NoCardsExtracted) {
                save(&store, &deck);
            }
            print_study_error(&e);
            return Ok(());
        }
    };
    save(&store, &deck);

    if replace {
        println!(
            "{} Replaced the deck with {} cards.",
            "✓".green(),
            added.to_string().cyan()
        );
    } else {
        println!(
            "{} Extracted {} cards, {} new. The deck now has {} cards.",
            "✓".green(),
            found,
            added.to_string().cyan(),
            deck.len()
        );
    }
    println!(
        "Run {} to review them or {} to start a quiz.",
        "studypal cards".cyan(),
        "studypal quiz".cyan()
    );

    Ok(())
}

/// Store `notes` on the deck and fold their cards in. Returns the number of
/// cards found and the number added. Notes that yield no cards are still
/// kept; blank notes leave the deck untouched.
fn apply_notes(deck: &mut Deck, notes: String, replace: bool) -> StudyResult<(usize, usize)> {
    let cards = match extract_cards(&notes) {
        Ok(cards) => cards,
        Err(StudyError::NoCardsExtracted) => {
            deck.notes = notes;
            return Err(StudyError::NoCardsExtracted);
        }
        Err(e) => return Err(e),
    };

    let found = cards.len();
    deck.notes = notes;
    let added = if replace {
        deck.replace_cards(cards)
    } else {
        deck.merge(cards)
    };
    Ok((found, added))
}

fn save(store: &DeckStore<'_>, deck: &Deck) {
    if !store.save(deck) {
        println!(
            "{} Could not save the deck; changes last only for this session.",
            "!".yellow().bold()
        );
    }
}
