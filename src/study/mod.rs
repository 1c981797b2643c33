//! Spaced-repetition quiz engine: mastery boxes, session building, choices and grading

pub mod distractors;
pub mod grading;
pub mod mastery;
pub mod quiz;
pub mod session;
pub mod shuffle;

pub use mastery::{BoxSummary, MasteryRecord, MasteryStore};
pub use quiz::{Outcome, Progress, Quiz, QuizConfig, QuizMode, QuizState};
