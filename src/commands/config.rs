use anyhow::Result;
use colored::Colorize;
use inquire::{Confirm, CustomType, Select};

use super::is_cancel;
use crate::config::Config;
use crate::study::QuizMode;
use crate::study::session::MAX_SESSION_LENGTH;

pub fn run() -> Result<()> {
    println!();
    println!(
        "    {}",
        "╭──────────────────────────────────────────────────────╮".bright_black()
    );
    println!(
        "    {}            {}            {}",
        "│".bright_black(),
        "⚙️  QUIZ SETTINGS ⚙️".bold().white(),
        "│".bright_black()
    );
    println!(
        "    {}        {}         {}",
        "│".bright_black(),
        "Defaults used when a quiz starts".dimmed(),
        "│".bright_black()
    );
    println!(
        "    {}",
        "╰──────────────────────────────────────────────────────╯".bright_black()
    );
    println!();

    let mut config = Config::load()?;

    let options = vec![
        "🔢  Quiz length        │ Cards per session",
        "🎛️   Quiz mode          │ Multiple choice or typed",
        "🔀  Shuffle            │ Mix cards within a session",
        "🅰️   Choices            │ Options per multiple-choice question",
        "📋  View Settings      │ See current configuration",
        "←   Back",
    ];

    loop {
        let selection =
            match Select::new("What would you like to configure?", options.clone()).prompt() {
                Ok(s) => s,
                Err(e) if is_cancel(&e) => break,
                Err(e) => return Err(e.into()),
            };

        let result = match selection {
            s if s.contains("Quiz length") => set_quiz_length(&mut config),
            s if s.contains("Quiz mode") => set_quiz_mode(&mut config),
            s if s.contains("Shuffle") => set_shuffle(&mut config),
            s if s.contains("Choices") => set_choice_count(&mut config),
            s if s.contains("View Settings") => {
                view_config(&config);
                Ok(())
            }
            s if s.contains("Back") => break,
            _ => Ok(()),
        };

        if let Err(e) = result {
            match e.downcast_ref::<inquire::InquireError>() {
                Some(ie) if is_cancel(ie) => println!("{}", "Cancelled.".dimmed()),
                _ => eprintln!("{} {}", "Error:".red(), e),
            }
        }

        println!();
    }

    Ok(())
}

fn set_quiz_length(config: &mut Config) -> Result<()> {
    let length = CustomType::<usize>::new("Cards per quiz:")
        .with_default(config.quiz_length())
        .with_help_message(&format!("1 to {}", MAX_SESSION_LENGTH))
        .with_error_message("Please enter a whole number")
        .prompt()?;

    config.quiz_length = Some(length);
    config.save()?;

    println!(
        "{} Quiz length set to {}",
        "✓".green(),
        config.quiz_length().to_string().yellow()
    );
    Ok(())
}

fn set_quiz_mode(config: &mut Config) -> Result<()> {
    let modes = vec![QuizMode::MultipleChoice, QuizMode::Typed];
    let start = modes
        .iter()
        .position(|m| *m == config.quiz_mode())
        .unwrap_or(0);

    let mode = Select::new("Default quiz mode:", modes)
        .with_starting_cursor(start)
        .prompt()?;

    config.quiz_mode = Some(mode);
    config.save()?;

    println!("{} Quiz mode set to {}", "✓".green(), mode.to_string().yellow());
    Ok(())
}

fn set_shuffle(config: &mut Config) -> Result<()> {
    let shuffle = Confirm::new("Shuffle cards within each quiz?")
        .with_default(config.shuffle())
        .prompt()?;

    config.shuffle = Some(shuffle);
    config.save()?;

    let state = if shuffle { "on" } else { "off" };
    println!("{} Shuffle {}", "✓".green(), state.yellow());
    Ok(())
}

fn set_choice_count(config: &mut Config) -> Result<()> {
    let count = CustomType::<usize>::new("Options per multiple-choice question:")
        .with_default(config.choice_count())
        .with_help_message("2 to 6")
        .with_error_message("Please enter a whole number")
        .prompt()?;

    config.choice_count = Some(count);
    config.save()?;

    println!(
        "{} Choices set to {}",
        "✓".green(),
        config.choice_count().to_string().yellow()
    );
    Ok(())
}

fn view_config(config: &Config) {
    println!("\n{}", "Current Configuration:".bold());
    println!("{}", "─".repeat(30).dimmed());

    println!("  Quiz length: {}", config.quiz_length());
    println!("  Quiz mode: {}", config.quiz_mode());
    println!(
        "  Shuffle: {}",
        if config.shuffle() { "on" } else { "off" }
    );
    println!("  Choices: {}", config.choice_count());

    if let Ok(path) = Config::config_path() {
        println!("  Config file: {}", path.display().to_string().dimmed());
    }

    if let Ok(path) = config.resolved_data_dir() {
        println!("  Data directory: {}", path.display().to_string().dimmed());
    }
}
