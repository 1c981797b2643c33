use anyhow::Result;
use colored::Colorize;
use inquire::Confirm;

use super::is_cancel;
use crate::storage::{DeckStore, open_backend};
use crate::study::mastery::MAX_BOX;
use crate::study::{BoxSummary, MasteryStore};

const BAR_WIDTH: usize = 30;

/// Show how the current deck is spread over the Leitner boxes
pub fn run() -> Result<()> {
    let backend = open_backend();
    let deck = DeckStore::new(backend.as_ref()).load();

    if deck.is_empty() {
        println!("{}", "No cards yet.".dimmed());
        println!(
            "Use {} to generate cards from your notes.",
            "studypal notes".cyan()
        );
        return Ok(());
    }

    let mastery = MasteryStore::load(backend.as_ref());
    let summary = mastery.summarize(&deck.cards);

    println!("\n{} {}", "Mastery".bold().cyan(), deck.title.dimmed());
    println!("{}", "─".repeat(50).dimmed());
    print_box_summary(&summary);

    Ok(())
}

/// One bar per box, scaled to the largest box
pub fn print_box_summary(summary: &BoxSummary) {
    let largest = summary.iter().map(|(_, count)| count).max().unwrap_or(0);

    for (level, count) in summary.iter() {
        let width = if largest == 0 {
            0
        } else {
            (count * BAR_WIDTH).div_ceil(largest)
        };
        let bar = "█".repeat(width);
        let bar = match level {
            1 => bar.red(),
            2 => bar.yellow(),
            3 => bar.cyan(),
            4 => bar.blue(),
            _ => bar.green(),
        };
        println!("  Box {}  {:>4}  {}", level, count, bar);
    }

    let total = summary.total();
    if total > 0 {
        let mastered = summary.count(MAX_BOX);
        let pct = (mastered as f64 / total as f64) * 100.0;
        println!(
            "\n  {} {}/{} in Box {} ({:.0}%)",
            "Mastered:".dimmed(),
            mastered.to_string().green().bold(),
            total,
            MAX_BOX,
            pct
        );
    }
}

/// Forget all mastery after confirmation. `yes` skips the prompt.
pub fn reset(yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new("Reset all mastery progress? Every card goes back to Box 1.")
            .with_default(false)
            .prompt();

        match confirmed {
            Ok(true) => {}
            Ok(false) => {
                println!("{}", "Cancelled.".dimmed());
                return Ok(());
            }
            Err(e) if is_cancel(&e) => {
                println!("{}", "Cancelled.".dimmed());
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
    }

    let backend = open_backend();
    let mut mastery = MasteryStore::load(backend.as_ref());
    if mastery.is_empty() {
        println!("{}", "No mastery progress to reset.".dimmed());
        return Ok(());
    }
    let forgotten = mastery.len();
    mastery.reset_all();

    if mastery.is_persistent() {
        println!(
            "{} Mastery reset ({} records cleared).",
            "✓".green(),
            forgotten
        );
    } else {
        println!(
            "{} Mastery reset for this session only; it could not be saved.",
            "!".yellow().bold()
        );
    }

    Ok(())
}
