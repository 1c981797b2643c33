//! Stable content-derived card identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
const SEPARATOR: &str = "::";
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Identity of a card, derived from its question and answer text only.
///
/// Used as the key into the mastery store, so editing either text produces a
/// different identity and orphans the old mastery record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn derive(question: &str, answer: &str) -> Self {
        let mut hash = FNV_OFFSET_BASIS;
        for byte in question
            .bytes()
            .chain(SEPARATOR.bytes())
            .chain(answer.bytes())
        {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        Self(to_base36(hash))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::with_capacity(13);
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();

    // Only ASCII digits were pushed
    digits.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identity_is_deterministic() {
        let a = CardId::derive("What is 2+2?", "4");
        let b = CardId::derive("What is 2+2?", "4");
        assert_eq!(a, b);
        assert!(a.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_identity_handles_empty_strings() {
        let empty = CardId::derive("", "");
        assert!(!empty.as_str().is_empty());
        assert_ne!(empty, CardId::derive("", "x"));
    }

    #[test]
    fn test_separator_placement_matters() {
        assert_ne!(CardId::derive("ab", "c"), CardId::derive("a", "bc"));
        assert_ne!(CardId::derive("q", "a"), CardId::derive("a", "q"));
    }

    #[test]
    fn test_no_collisions_for_realistic_deck() {
        let mut seen = HashSet::new();
        for i in 0..500 {
            let id = CardId::derive(&format!("Question number {}?", i), &format!("Answer {}", i));
            assert!(seen.insert(id), "collision at card {}", i);
        }
    }

    #[test]
    fn test_base36_encoding() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
