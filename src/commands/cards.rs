use anyhow::Result;
use colored::Colorize;
use inquire::{Select, Text};

use super::is_cancel;
use crate::deck::{Card, Deck};
use crate::storage::{DeckStore, open_backend};
use crate::study::MasteryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Interactive card management
pub fn run() -> Result<()> {
    println!("{}", "Card Management".bold().cyan());
    println!("{}", "─".repeat(40).dimmed());

    let options = vec![
        "List cards",
        "Edit a card",
        "Delete a card",
        "Move a card up",
        "Move a card down",
        "Back",
    ];

    loop {
        let selection = match Select::new("What would you like to do?", options.clone()).prompt()
        {
            Ok(s) => s,
            Err(e) if is_cancel(&e) => break,
            Err(e) => return Err(e.into()),
        };

        match selection {
            "List cards" => list()?,
            "Edit a card" => edit(None)?,
            "Delete a card" => delete(None)?,
            "Move a card up" => move_card(None, Direction::Up)?,
            "Move a card down" => move_card(None, Direction::Down)?,
            "Back" => break,
            _ => unreachable!(),
        }

        println!();
    }

    Ok(())
}

/// List every card with its Leitner box
pub fn list() -> Result<()> {
    let backend = open_backend();
    let deck = DeckStore::new(backend.as_ref()).load();

    if deck.is_empty() {
        print_empty_deck();
        return Ok(());
    }

    let mastery = MasteryStore::load(backend.as_ref());

    println!(
        "\n{} ({} cards)\n",
        deck.title.bold(),
        deck.len()
    );

    for (i, card) in deck.cards.iter().enumerate() {
        print_card(i, card, mastery.box_for(&card.id()));
    }

    Ok(())
}

/// Edit the question and answer of card `number` (1-based)
pub fn edit(number: Option<usize>) -> Result<()> {
    let backend = open_backend();
    let store = DeckStore::new(backend.as_ref());
    let mut deck = store.load();

    let Some(index) = pick_card(&deck, number, "Card to edit:")? else {
        return Ok(());
    };
    let Some(card) = deck.get(index).cloned() else {
        return Ok(());
    };

    let edited = Text::new("Question:")
        .with_initial_value(&card.question)
        .prompt()
        .and_then(|question| {
            Text::new("Answer:")
                .with_initial_value(&card.answer)
                .prompt()
                .map(|answer| (question, answer))
        });

    let (question, answer) = match edited {
        Ok(pair) => pair,
        Err(e) if is_cancel(&e) => {
            println!("{}", "Cancelled.".dimmed());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if question.trim().is_empty() || answer.trim().is_empty() {
        println!(
            "{} Question and answer must not be empty.",
            "✗".red().bold()
        );
        return Ok(());
    }

    deck.edit(index, &question, &answer);
    save(&store, &deck);

    if deck.cards[index].id() != card.id() {
        println!(
            "{} Card {} updated. Its mastery starts over in Box 1.",
            "✓".green(),
            index + 1
        );
    } else {
        println!("{} Card {} unchanged.", "✓".green(), index + 1);
    }

    Ok(())
}

/// Delete card `number` (1-based)
pub fn delete(number: Option<usize>) -> Result<()> {
    let backend = open_backend();
    let store = DeckStore::new(backend.as_ref());
    let mut deck = store.load();

    let Some(index) = pick_card(&deck, number, "Card to delete:")? else {
        return Ok(());
    };

    if let Some(card) = deck.delete(index) {
        save(&store, &deck);
        println!(
            "{} Deleted: {}",
            "✓".green(),
            truncate(&card.question, 60)
        );
    }

    Ok(())
}

/// Swap card `number` (1-based) with its neighbour
pub fn move_card(number: Option<usize>, direction: Direction) -> Result<()> {
    let backend = open_backend();
    let store = DeckStore::new(backend.as_ref());
    let mut deck = store.load();

    let Some(index) = pick_card(&deck, number, "Card to move:")? else {
        return Ok(());
    };

    let (moved, target) = match direction {
        Direction::Up => (deck.move_up(index), index.wrapping_sub(1)),
        Direction::Down => (deck.move_down(index), index + 1),
    };

    if moved {
        save(&store, &deck);
        println!(
            "{} Card {} is now card {}.",
            "✓".green(),
            index + 1,
            target + 1
        );
    } else {
        println!("{}", "Card is already at that end of the deck.".dimmed());
    }

    Ok(())
}

/// Resolve a 1-based card number, prompting when none was given.
/// `None` means there is nothing to act on.
fn pick_card(deck: &Deck, number: Option<usize>, message: &str) -> Result<Option<usize>> {
    if deck.is_empty() {
        print_empty_deck();
        return Ok(None);
    }

    if let Some(n) = number {
        if n == 0 || n > deck.len() {
            println!(
                "{} No card {}. The deck has {} cards.",
                "✗".red().bold(),
                n,
                deck.len()
            );
            return Ok(None);
        }
        return Ok(Some(n - 1));
    }

    let labels: Vec<String> = deck
        .cards
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{:>3}. {}", i + 1, truncate(&c.question, 60)))
        .collect();

    match Select::new(message, labels).raw_prompt() {
        Ok(choice) => Ok(Some(choice.index)),
        Err(e) if is_cancel(&e) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn save(store: &DeckStore<'_>, deck: &Deck) {
    if !store.save(deck) {
        println!(
            "{} Could not save the deck; changes last only for this session.",
            "!".yellow().bold()
        );
    }
}

fn print_card(index: usize, card: &Card, level: u8) {
    println!(
        "{} {} {}",
        format!("{:>3}.", index + 1).cyan(),
        card.question.bold(),
        format!("[Box {}]", level).dimmed()
    );
    println!("     {}", card.answer);
    if !card.tags.is_empty() {
        let tags: Vec<&str> = card.tags.iter().map(String::as_str).collect();
        println!("     {}", tags.join(", ").dimmed());
    }
    println!();
}

fn print_empty_deck() {
    println!("{}", "No cards yet.".dimmed());
    println!(
        "Use {} to generate cards from your notes.",
        "studypal notes".cyan()
    );
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}…", cut)
    }
}
