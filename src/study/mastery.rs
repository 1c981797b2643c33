//! Leitner-box mastery tracking
//!
//! Every card sits in one of five boxes. A correct answer moves it up one box
//! (capped at the top box), a miss sends it back to box 1. Cards that were
//! never graded have no record and count as box 1.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::deck::{Card, CardId};
use crate::error::StorageError;
use crate::storage::{KeyValueStore, MASTERY_NAMESPACE};

pub const MIN_BOX: u8 = 1;
pub const MAX_BOX: u8 = 5;
pub const BOX_COUNT: usize = MAX_BOX as usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryRecord {
    #[serde(rename = "box")]
    pub level: u8,
    pub streak: u32,
    pub last_updated_at: DateTime<Utc>,
}

impl MasteryRecord {
    fn apply(&mut self, correct: bool, now: DateTime<Utc>) {
        if correct {
            self.level = (self.level + 1).min(MAX_BOX);
            self.streak += 1;
        } else {
            self.level = MIN_BOX;
            self.streak = 0;
        }
        self.last_updated_at = now;
    }
}

/// How many cards sit in each box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxSummary([usize; BOX_COUNT]);

impl BoxSummary {
    /// Count for a box in `1..=5`; other values read as zero
    pub fn count(&self, level: u8) -> usize {
        match level {
            MIN_BOX..=MAX_BOX => self.0[usize::from(level - 1)],
            _ => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// `(box, count)` pairs from box 1 to box 5
    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        (MIN_BOX..=MAX_BOX).zip(self.0.iter().copied())
    }
}

impl fmt::Display for BoxSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(level, count)| format!("Box {}: {}", level, count))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// Mastery records keyed by card identity, independent of any deck.
///
/// When attached to a backend the whole map is written after every change.
/// A failed write detaches the store, which keeps working in memory.
pub struct MasteryStore<'a> {
    records: HashMap<CardId, MasteryRecord>,
    backend: Option<&'a dyn KeyValueStore>,
}

#[cfg(test)]
impl MasteryStore<'static> {
    pub fn in_memory() -> Self {
        Self {
            records: HashMap::new(),
            backend: None,
        }
    }
}

impl<'a> MasteryStore<'a> {
    /// Load saved mastery. Unreadable data yields an empty store that still
    /// tries to save to the backend.
    pub fn load(backend: &'a dyn KeyValueStore) -> Self {
        let records = match Self::read(backend) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Could not load mastery data, starting fresh: {}", e);
                HashMap::new()
            }
        };

        Self {
            records,
            backend: Some(backend),
        }
    }

    fn read(backend: &dyn KeyValueStore) -> Result<HashMap<CardId, MasteryRecord>, StorageError> {
        match backend.get(MASTERY_NAMESPACE)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(HashMap::new()),
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.backend.is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, id: &CardId) -> Option<&MasteryRecord> {
        self.records.get(id)
    }

    pub fn box_for(&self, id: &CardId) -> u8 {
        self.record(id).map_or(MIN_BOX, |r| r.level)
    }

    pub fn record_result(&mut self, id: &CardId, correct: bool) -> &MasteryRecord {
        self.record_result_at(id, correct, Utc::now())
    }

    pub fn record_result_at(
        &mut self,
        id: &CardId,
        correct: bool,
        now: DateTime<Utc>,
    ) -> &MasteryRecord {
        self.records
            .entry(id.clone())
            .or_insert_with(|| MasteryRecord {
                level: MIN_BOX,
                streak: 0,
                last_updated_at: now,
            })
            .apply(correct, now);

        tracing::debug!(card = %id, correct, "recorded result");
        self.persist();

        &self.records[id]
    }

    pub fn summarize<'c>(&self, cards: impl IntoIterator<Item = &'c Card>) -> BoxSummary {
        let mut counts = [0usize; BOX_COUNT];
        for card in cards {
            counts[usize::from(self.box_for(&card.id()) - 1)] += 1;
        }
        BoxSummary(counts)
    }

    /// Forget every record. Callers confirm with the user first.
    pub fn reset_all(&mut self) {
        self.records.clear();

        if let Some(backend) = self.backend
            && let Err(e) = backend.remove(MASTERY_NAMESPACE)
        {
            tracing::warn!("Could not clear saved mastery data: {}", e);
            self.backend = None;
        }
    }

    fn persist(&mut self) {
        let Some(backend) = self.backend else {
            return;
        };

        let result = serde_json::to_string(&self.records)
            .map_err(StorageError::from)
            .and_then(|json| backend.set(MASTERY_NAMESPACE, &json));

        if let Err(e) = result {
            tracing::warn!(
                "Could not save mastery data, progress is kept in memory for this session: {}",
                e
            );
            self.backend = None;
        }
    }
}
