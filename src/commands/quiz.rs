use anyhow::Result;
use colored::Colorize;
use inquire::{Select, Text};

use super::progress::print_box_summary;
use super::{is_cancel, print_study_error};
use crate::config::Config;
use crate::storage::{DeckStore, open_backend};
use crate::study::session::clamp_length;
use crate::study::{MasteryStore, Outcome, Quiz, QuizMode, QuizState};

const REVEAL_OPTION: &str = "👀  Reveal answer";
const SKIP_OPTION: &str = "⏭   Skip";
const REVEAL_COMMAND: &str = "?";

/// Command-line overrides for the configured quiz defaults
#[derive(Debug, Clone, Copy, Default)]
pub struct QuizOptions {
    pub length: Option<usize>,
    pub mode: Option<QuizMode>,
    pub shuffle: Option<bool>,
}

/// What the user did with the current card
enum Response {
    Answer(String),
    Reveal,
    Skip,
    Quit,
}

pub fn run(options: QuizOptions) -> Result<()> {
    let mut config = Config::load()?.quiz_config();
    if let Some(length) = options.length {
        config.length = clamp_length(length);
    }
    if let Some(mode) = options.mode {
        config.mode = mode;
    }
    if let Some(shuffle) = options.shuffle {
        config.shuffle = shuffle;
    }

    let backend = open_backend();
    let deck = DeckStore::new(backend.as_ref()).load();
    let mut mastery = MasteryStore::load(backend.as_ref());

    let mut quiz = Quiz::new(config, rand::thread_rng());
    if let Err(e) = quiz.start(&deck, &mastery) {
        print_study_error(&e);
        return Ok(());
    }

    print_quiz_header(quiz.progress().total, quiz.mode());

    while let Some(card) = quiz.current_card() {
        let progress = quiz.progress();
        println!(
            "\n{} [{}/{}] {}",
            "Question".bold().cyan(),
            progress.answered + 1,
            progress.total,
            format!("{}% done", progress.percent()).dimmed()
        );
        println!("  {}", card.question);
        println!();

        let response = match quiz.mode() {
            QuizMode::MultipleChoice => ask_choice(quiz.current_choices(), quiz.is_revealed())?,
            QuizMode::Typed => ask_typed(quiz.is_revealed())?,
        };

        let outcome = match response {
            Response::Answer(answer) => quiz.submit_answer(&answer, &mut mastery),
            Response::Skip => quiz.skip(&mut mastery),
            Response::Reveal => {
                match quiz.reveal(&mut mastery) {
                    Ok(answer) => println!("  {} {}", "Answer:".yellow().bold(), answer),
                    Err(e) => print_study_error(&e),
                }
                continue;
            }
            Response::Quit => {
                println!("{}", "Quiz stopped early.".dimmed());
                break;
            }
        };

        match outcome {
            Ok(outcome) => {
                print_outcome(&outcome);
                if !outcome.finished {
                    println!("{}", "─".repeat(50).dimmed());
                }
            }
            Err(e) => {
                print_study_error(&e);
                break;
            }
        }
    }

    let finished = matches!(quiz.state(), QuizState::Complete { .. });
    let progress = quiz.progress();
    let (score, total) = quiz
        .final_score()
        .unwrap_or((progress.correct, progress.answered));

    print_quiz_summary(score, total);
    if finished && total > 0 && score == total {
        println!("    {}", "🎉 Perfect score!".green().bold());
        println!();
    }

    println!("{}", "Mastery".bold().cyan());
    print_box_summary(&mastery.summarize(&deck.cards));

    if !mastery.is_persistent() {
        println!(
            "\n{} Progress could not be saved; it lasts only for this session.",
            "!".yellow().bold()
        );
    }

    Ok(())
}

fn ask_choice(choices: &[String], revealed: bool) -> Result<Response> {
    let mut options: Vec<String> = choices.to_vec();
    let reveal_at = options.len();
    if !revealed {
        options.push(REVEAL_OPTION.to_string());
    }
    options.push(SKIP_OPTION.to_string());

    let selection = match Select::new("Your answer:", options)
        .with_help_message("Esc to stop the quiz")
        .raw_prompt()
    {
        Ok(s) => s,
        Err(e) if is_cancel(&e) => return Ok(Response::Quit),
        Err(e) => return Err(e.into()),
    };

    Ok(match selection.index {
        i if i < reveal_at => Response::Answer(selection.value),
        i if i == reveal_at && !revealed => Response::Reveal,
        _ => Response::Skip,
    })
}

fn ask_typed(revealed: bool) -> Result<Response> {
    let help = if revealed {
        "Type the answer to continue, Enter to skip"
    } else {
        "Enter to skip, '?' to reveal the answer, Esc to stop"
    };

    let answer = match Text::new("Your answer:").with_help_message(help).prompt() {
        Ok(a) => a,
        Err(e) if is_cancel(&e) => return Ok(Response::Quit),
        Err(e) => return Err(e.into()),
    };

    let answer = answer.trim();
    Ok(match answer {
        "" => Response::Skip,
        REVEAL_COMMAND if !revealed => Response::Reveal,
        _ => Response::Answer(answer.to_string()),
    })
}

fn print_outcome(outcome: &Outcome) {
    if outcome.correct {
        println!("  {} Correct!", "✓".green().bold());
    } else if outcome.revealed {
        println!("  {} Counted as missed", "✗".red().bold());
    } else {
        println!("  {} Incorrect", "✗".red().bold());
        println!("  {} {}", "Expected:".dimmed(), outcome.expected);
    }
}

fn print_quiz_header(total: usize, mode: QuizMode) {
    let mode = match mode {
        QuizMode::MultipleChoice => "multiple choice",
        QuizMode::Typed => "typed answers",
    };

    println!();
    println!(
        "    {}",
        "╭──────────────────────────────────────────────────────╮".magenta()
    );
    println!(
        "    {}                  {}                  {}",
        "│".magenta(),
        "🎯 QUIZ TIME 🎯".bold().white(),
        "│".magenta()
    );
    println!(
        "    {}   {} cards, {}, weakest boxes first       {}",
        "│".magenta(),
        total.to_string().yellow().bold(),
        mode.dimmed(),
        "│".magenta()
    );
    println!(
        "    {}",
        "╰──────────────────────────────────────────────────────╯".magenta()
    );
}

fn print_quiz_summary(correct: usize, total: usize) {
    let pct = if total > 0 {
        (correct as f64 / total as f64) * 100.0
    } else {
        0.0
    };

    println!();
    println!(
        "    {}",
        "╭──────────────────────────────────────────────────────╮".green()
    );
    println!(
        "    {}             {}             {}",
        "│".green(),
        "🎯 QUIZ RESULTS 🎯".bold().white(),
        "│".green()
    );
    println!(
        "    {}  Score: {}/{} ({:.0}%)                               {}",
        "│".green(),
        correct.to_string().cyan(),
        total,
        pct,
        "│".green()
    );
    println!(
        "    {}",
        "╰──────────────────────────────────────────────────────╯".green()
    );
    println!();
}
