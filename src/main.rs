use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod deck;
mod error;
mod ingest;
mod storage;
mod study;

use commands::cards::Direction;
use commands::quiz::QuizOptions;
use study::QuizMode;

/// ASCII art banner for the application
const BANNER: &str = r#"
  ____  _             _       ____       _
 / ___|| |_ _   _  __| |_   _|  _ \ __ _| |
 \___ \| __| | | |/ _` | | | | |_) / _` | |
  ___) | |_| |_| | (_| | |_| |  __/ (_| | |
 |____/ \__|\__,_|\__,_|\__, |_|   \__,_|_|
                        |___/
"#;

fn print_banner() {
    println!("{}", BANNER.cyan().bold());
}

/// Print a styled status line
fn print_status(label: &str, value: &str, icon: &str) {
    println!(
        "  {} {} {}",
        icon,
        format!("{}:", label).dimmed(),
        value.cyan()
    );
}

#[derive(Parser)]
#[command(name = "studypal")]
#[command(about = "Turn your notes into flashcards and quiz yourself with Leitner boxes")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate cards from notes (a file, `-` for stdin, or an editor)
    Notes {
        /// Notes file to read (opens an editor if omitted)
        path: Option<PathBuf>,
        /// Replace the deck's cards instead of merging
        #[arg(long)]
        replace: bool,
    },
    /// Manage cards (list, edit, delete, reorder)
    Cards {
        #[command(subcommand)]
        action: Option<CardAction>,
    },
    /// Start a quiz, weakest cards first
    Quiz {
        /// Number of cards (1-25)
        #[arg(short, long)]
        length: Option<usize>,
        /// Answer by picking from options or by typing
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,
        /// Shuffle cards within the session
        #[arg(long, conflicts_with = "no_shuffle")]
        shuffle: bool,
        /// Keep weakest-first order
        #[arg(long)]
        no_shuffle: bool,
    },
    /// Show mastery per Leitner box
    Progress,
    /// Reset all mastery progress
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Replace the deck with cards from a JSON deck file
    Import {
        /// Deck file to import
        path: Option<PathBuf>,
    },
    /// Write the deck to a JSON deck file
    Export {
        /// Output file (default: deck.json)
        path: Option<PathBuf>,
    },
    /// Configure quiz defaults
    Config,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Pick the answer from a list of options
    Choice,
    /// Type the answer; case, punctuation and spacing are ignored
    Typed,
}

impl From<ModeArg> for QuizMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Choice => QuizMode::MultipleChoice,
            ModeArg::Typed => QuizMode::Typed,
        }
    }
}

#[derive(Subcommand)]
enum CardAction {
    /// List all cards
    List,
    /// Edit a card's question and answer
    Edit {
        /// Card number as shown by `cards list`
        number: Option<usize>,
    },
    /// Delete a card
    Delete {
        /// Card number as shown by `cards list`
        number: Option<usize>,
    },
    /// Move a card one place up
    Up {
        /// Card number as shown by `cards list`
        number: Option<usize>,
    },
    /// Move a card one place down
    Down {
        /// Card number as shown by `cards list`
        number: Option<usize>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "studypal=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Notes { path, replace }) => {
            commands::notes::run(path, replace)?;
        }
        Some(Commands::Cards { action }) => match action {
            Some(CardAction::List) => commands::cards::list()?,
            Some(CardAction::Edit { number }) => commands::cards::edit(number)?,
            Some(CardAction::Delete { number }) => commands::cards::delete(number)?,
            Some(CardAction::Up { number }) => {
                commands::cards::move_card(number, Direction::Up)?;
            }
            Some(CardAction::Down { number }) => {
                commands::cards::move_card(number, Direction::Down)?;
            }
            None => commands::cards::run()?,
        },
        Some(Commands::Quiz {
            length,
            mode,
            shuffle,
            no_shuffle,
        }) => {
            let shuffle = match (shuffle, no_shuffle) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            commands::quiz::run(QuizOptions {
                length,
                mode: mode.map(QuizMode::from),
                shuffle,
            })?;
        }
        Some(Commands::Progress) => {
            commands::progress::run()?;
        }
        Some(Commands::Reset { yes }) => {
            commands::progress::reset(yes)?;
        }
        Some(Commands::Import { path }) => {
            commands::deck::import(path)?;
        }
        Some(Commands::Export { path }) => {
            commands::deck::export(path)?;
        }
        Some(Commands::Config) => {
            commands::config::run()?;
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
        None => {
            // No subcommand - show interactive menu
            run_interactive()?;
        }
    }

    Ok(())
}

fn print_deck_status() {
    let backend = storage::open_backend();
    let deck = storage::DeckStore::new(backend.as_ref()).load();
    let mastered = study::MasteryStore::load(backend.as_ref())
        .summarize(&deck.cards)
        .count(study::mastery::MAX_BOX);

    print_status("Deck", &deck.title, "📚");
    print_status("Cards", &deck.len().to_string(), "🃏");
    print_status("Mastered", &mastered.to_string(), "🏆");
}

fn run_interactive() -> Result<()> {
    use inquire::Select;

    print_banner();

    println!(
        "  {} {}",
        "Version:".dimmed(),
        env!("CARGO_PKG_VERSION").cyan()
    );
    println!(
        "  {} {}\n",
        "Study with:".dimmed(),
        "Leitner boxes, weakest cards first".green()
    );

    println!("{}", "─".repeat(50).dimmed());
    print_deck_status();
    println!("{}\n", "─".repeat(50).dimmed());

    let options = vec![
        "📝  Generate cards from notes",
        "🎯  Start a quiz",
        "🗂️   Manage cards",
        "📊  View progress",
        "📥  Import a deck",
        "📤  Export the deck",
        "♻️   Reset progress",
        "⚙️   Configure settings",
        "🚪  Exit",
    ];

    loop {
        let selection = match Select::new("What would you like to do?", options.clone())
            .with_help_message("Use arrow keys to navigate, Enter to select")
            .prompt()
        {
            Ok(s) => s,
            Err(e) if commands::is_cancel(&e) => break,
            Err(e) => return Err(e.into()),
        };

        println!();

        match selection {
            s if s.contains("Generate cards") => commands::notes::run(None, false)?,
            s if s.contains("Start a quiz") => commands::quiz::run(QuizOptions::default())?,
            s if s.contains("Manage cards") => commands::cards::run()?,
            s if s.contains("View progress") => commands::progress::run()?,
            s if s.contains("Import") => commands::deck::import(None)?,
            s if s.contains("Export") => commands::deck::export(None)?,
            s if s.contains("Reset") => commands::progress::reset(false)?,
            s if s.contains("Configure") => commands::config::run()?,
            s if s.contains("Exit") => break,
            _ => unreachable!(),
        }

        println!();
    }

    println!("{}", "👋 Thanks for using StudyPal! Happy learning!".cyan());

    Ok(())
}
