//! Quiz runner: walks a session one card at a time and grades answers

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::distractors::build_choices;
use super::grading::{exact_match, typed_match};
use super::mastery::MasteryStore;
use super::session::{build_session, clamp_length};
use crate::deck::{Card, Deck};
use crate::error::{StudyError, StudyResult};

pub const DEFAULT_CHOICE_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuizMode {
    /// Pick the answer from a list of options
    #[default]
    #[serde(rename = "choice")]
    MultipleChoice,
    /// Type the answer; case, punctuation and spacing are ignored
    #[serde(rename = "typed")]
    Typed,
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MultipleChoice => "choice",
            Self::Typed => "typed",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizConfig {
    pub length: usize,
    pub mode: QuizMode,
    pub shuffle: bool,
    pub choice_count: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            length: 5,
            mode: QuizMode::MultipleChoice,
            shuffle: false,
            choice_count: DEFAULT_CHOICE_COUNT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    NotStarted,
    InProgress { cursor: usize, correct: usize },
    Complete { score: usize, total: usize },
}

/// Result of grading one card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub correct: bool,
    pub expected: String,
    pub revealed: bool,
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
    pub correct: usize,
}

impl Progress {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.answered as f64 / self.total as f64) * 100.0).round() as u32
    }
}

pub struct Quiz<R> {
    config: QuizConfig,
    rng: R,
    queue: Vec<Card>,
    answer_pool: Vec<String>,
    choices: Vec<String>,
    revealed: bool,
    state: QuizState,
}

impl<R: Rng> Quiz<R> {
    pub fn new(config: QuizConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            queue: Vec::new(),
            answer_pool: Vec::new(),
            choices: Vec::new(),
            revealed: false,
            state: QuizState::NotStarted,
        }
    }

    /// Begin a new session over `deck`, discarding any previous one
    pub fn start(&mut self, deck: &Deck, mastery: &MasteryStore<'_>) -> StudyResult<()> {
        if deck.is_empty() {
            return Err(StudyError::EmptyDeck);
        }

        self.queue = build_session(
            &deck.cards,
            mastery,
            clamp_length(self.config.length),
            self.config.shuffle,
            &mut self.rng,
        )?;
        self.answer_pool = deck.answers();
        self.state = if self.queue.is_empty() {
            QuizState::Complete { score: 0, total: 0 }
        } else {
            QuizState::InProgress {
                cursor: 0,
                correct: 0,
            }
        };
        self.enter_card();

        Ok(())
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn mode(&self) -> QuizMode {
        self.config.mode
    }

    pub fn current_card(&self) -> Option<&Card> {
        match self.state {
            QuizState::InProgress { cursor, .. } => self.queue.get(cursor),
            _ => None,
        }
    }

    /// Options for the current card; empty in typed mode
    pub fn current_choices(&self) -> &[String] {
        &self.choices
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn progress(&self) -> Progress {
        let total = self.queue.len();
        match self.state {
            QuizState::NotStarted => Progress {
                answered: 0,
                total,
                correct: 0,
            },
            QuizState::InProgress { cursor, correct } => Progress {
                answered: cursor,
                total,
                correct,
            },
            QuizState::Complete { score, total } => Progress {
                answered: total,
                total,
                correct: score,
            },
        }
    }

    pub fn final_score(&self) -> Option<(usize, usize)> {
        match self.state {
            QuizState::Complete { score, total } => Some((score, total)),
            _ => None,
        }
    }

    /// Grade a response for the current card and move on
    pub fn submit_answer(
        &mut self,
        response: &str,
        mastery: &mut MasteryStore<'_>,
    ) -> StudyResult<Outcome> {
        let card = self.current_card().ok_or(StudyError::NotInProgress)?;
        let correct = match self.config.mode {
            QuizMode::MultipleChoice => exact_match(response, &card.answer),
            QuizMode::Typed => typed_match(response, &card.answer),
        };
        self.conclude(correct, mastery)
    }

    /// Show the answer. Counts as a miss for mastery; the cursor stays put
    /// until the caller submits or skips.
    pub fn reveal(&mut self, mastery: &mut MasteryStore<'_>) -> StudyResult<String> {
        let card = self.current_card().ok_or(StudyError::NotInProgress)?;
        let (id, answer) = (card.id(), card.answer.clone());

        if !self.revealed {
            mastery.record_result(&id, false);
            self.revealed = true;
        }

        Ok(answer)
    }

    /// Give up on the current card without answering
    pub fn skip(&mut self, mastery: &mut MasteryStore<'_>) -> StudyResult<Outcome> {
        if self.current_card().is_none() {
            return Err(StudyError::NotInProgress);
        }
        self.conclude(false, mastery)
    }

    fn conclude(&mut self, correct: bool, mastery: &mut MasteryStore<'_>) -> StudyResult<Outcome> {
        let QuizState::InProgress {
            cursor,
            correct: tally,
        } = self.state
        else {
            return Err(StudyError::NotInProgress);
        };
        let card = &self.queue[cursor];

        // A revealed card was already recorded as a miss and cannot score
        let revealed = self.revealed;
        let correct = correct && !revealed;
        if !revealed {
            mastery.record_result(&card.id(), correct);
        }

        let expected = card.answer.clone();
        let tally = tally + usize::from(correct);
        let next = cursor + 1;

        self.state = if next >= self.queue.len() {
            QuizState::Complete {
                score: tally,
                total: self.queue.len(),
            }
        } else {
            QuizState::InProgress {
                cursor: next,
                correct: tally,
            }
        };
        self.enter_card();

        Ok(Outcome {
            correct,
            expected,
            revealed,
            finished: matches!(self.state, QuizState::Complete { .. }),
        })
    }

    fn enter_card(&mut self) {
        self.revealed = false;
        self.choices.clear();

        let QuizState::InProgress { cursor, .. } = self.state else {
            return;
        };
        if self.config.mode != QuizMode::MultipleChoice {
            return;
        }

        let Some(card) = self.queue.get(cursor) else {
            return;
        };
        self.choices = build_choices(
            &card.answer,
            self.answer_pool.iter().map(String::as_str),
            self.config.choice_count,
            &mut self.rng,
        );
    }
}
