use anyhow::{Context, Result};
use colored::Colorize;
use inquire::Text;
use std::path::PathBuf;

use super::{is_cancel, print_study_error};
use crate::deck::interchange::{export_deck, import_into};
use crate::storage::{DeckStore, open_backend};

const DEFAULT_EXPORT_FILE: &str = "deck.json";

/// Replace the deck's cards with those in a deck file
pub fn import(path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => match Text::new("Deck file to import:").prompt() {
            Ok(p) if !p.trim().is_empty() => PathBuf::from(p.trim()),
            Ok(_) => {
                println!("{}", "No file given.".dimmed());
                return Ok(());
            }
            Err(e) if is_cancel(&e) => return Ok(()),
            Err(e) => return Err(e.into()),
        },
    };

    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read deck file: {:?}", path))?;

    let backend = open_backend();
    let store = DeckStore::new(backend.as_ref());
    let mut deck = store.load();

    match import_into(&mut deck, &json) {
        Ok(count) => {
            if !store.save(&deck) {
                println!(
                    "{} Could not save the deck; changes last only for this session.",
                    "!".yellow().bold()
                );
            }
            println!(
                "{} Imported {} cards into {}.",
                "✓".green(),
                count.to_string().cyan(),
                deck.title.bold()
            );
        }
        Err(e) => print_study_error(&e),
    }

    Ok(())
}

/// Write the deck as pretty-printed JSON, to `deck.json` by default
pub fn export(path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));

    let backend = open_backend();
    let deck = DeckStore::new(backend.as_ref()).load();

    let json = match export_deck(&deck) {
        Ok(json) => json,
        Err(e) => {
            print_study_error(&e);
            return Ok(());
        }
    };

    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write deck file: {:?}", path))?;

    println!(
        "{} Exported {} cards to {}",
        "✓".green(),
        deck.len(),
        path.display().to_string().cyan()
    );

    Ok(())
}
