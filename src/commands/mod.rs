pub mod cards;
pub mod config;
pub mod deck;
pub mod notes;
pub mod progress;
pub mod quiz;

use colored::Colorize;

use crate::error::StudyError;

/// Print a core error as a user-facing message
pub(crate) fn print_study_error(err: &StudyError) {
    println!("{} {}", "✗".red().bold(), err);
}

/// True when the user backed out of an inquire prompt with Esc or Ctrl-C
pub(crate) fn is_cancel(err: &inquire::InquireError) -> bool {
    matches!(
        err,
        inquire::InquireError::OperationCanceled | inquire::InquireError::OperationInterrupted
    )
}
