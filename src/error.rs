//! Error types shared by the study core

use thiserror::Error;

/// Failures of the key-value persistence layer
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by the study core to its caller
#[derive(Debug, Error)]
pub enum StudyError {
    #[error("{0}")]
    InputRejected(String),

    #[error("No cards yet. Generate cards from your notes first.")]
    EmptyDeck,

    #[error(
        "No cards found in your notes. Try \"Q: question\" followed by \"A: answer\", \
         \"Term: definition\" lines, or a few complete sentences."
    )]
    NoCardsExtracted,

    #[error("No quiz is in progress")]
    NotInProgress,

    #[error("Storage unavailable: {0}")]
    PersistenceUnavailable(#[from] StorageError),
}

impl StudyError {
    pub fn invalid_deck_file(reason: impl std::fmt::Display) -> Self {
        Self::InputRejected(format!("Invalid deck file: {}", reason))
    }
}

/// Result type alias for study core operations
pub type StudyResult<T> = Result<T, StudyError>;
