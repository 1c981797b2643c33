use rand::Rng;

use super::mastery::{BOX_COUNT, MasteryStore};
use super::shuffle::shuffle;
use crate::deck::Card;
use crate::error::{StudyError, StudyResult};

/// Hard ceiling callers clamp requested quiz lengths to
pub const MAX_SESSION_LENGTH: usize = 25;

/// Clamp a requested length to `1..=MAX_SESSION_LENGTH`
pub fn clamp_length(requested: usize) -> usize {
    requested.clamp(1, MAX_SESSION_LENGTH)
}

/// Pick the cards for a quiz.
///
/// Cards are ordered least-mastered first (box 1 through 5, deck order within a
/// box). With `shuffle` the whole ordering is randomized instead. The result
/// holds `min(requested_len, cards.len())` cards.
pub fn build_session<R: Rng + ?Sized>(
    cards: &[Card],
    mastery: &MasteryStore<'_>,
    requested_len: usize,
    shuffled: bool,
    rng: &mut R,
) -> StudyResult<Vec<Card>> {
    if cards.is_empty() {
        return Err(StudyError::EmptyDeck);
    }

    let mut buckets: [Vec<&Card>; BOX_COUNT] = Default::default();
    for card in cards {
        let level = usize::from(mastery.box_for(&card.id()));
        buckets[level.clamp(1, BOX_COUNT) - 1].push(card);
    }

    let mut queue: Vec<Card> = buckets.into_iter().flatten().cloned().collect();

    if shuffled {
        shuffle(&mut queue, rng);
    }

    queue.truncate(requested_len.min(cards.len()));

    tracing::debug!(
        deck_size = cards.len(),
        session_len = queue.len(),
        shuffled,
        "built quiz session"
    );

    Ok(queue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn cards(n: usize) -> Vec<Card> {
        (1..=n)
            .map(|i| Card::new(format!("Q{}", i), format!("A{}", i)))
            .collect()
    }

    fn raise_to(store: &mut MasteryStore<'_>, card: &Card, level: u8) {
        for _ in 1..level {
            store.record_result(&card.id(), true);
        }
    }

    #[test]
    fn test_orders_by_box_then_deck_order() {
        let deck = cards(4);
        let mut store = MasteryStore::in_memory();
        raise_to(&mut store, &deck[0], 3);
        raise_to(&mut store, &deck[2], 5);

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let session = build_session(&deck, &store, 4, false, &mut rng).unwrap();
        let questions: Vec<&str> = session.iter().map(|c| c.question.as_str()).collect();

        assert_eq!(questions, vec!["Q2", "Q4", "Q1", "Q3"]);
    }

    #[test]
    fn test_truncates_to_requested_and_deck_size() {
        let deck = cards(6);
        let store = MasteryStore::in_memory();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let short = build_session(&deck, &store, 2, false, &mut rng).unwrap();
        assert_eq!(short.len(), 2);
        assert_eq!(short[0].question, "Q1");

        let long = build_session(&deck, &store, 25, false, &mut rng).unwrap();
        assert_eq!(long.len(), 6);
    }

    #[test]
    fn test_shuffle_keeps_same_cards() {
        let deck = cards(10);
        let store = MasteryStore::in_memory();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let session = build_session(&deck, &store, 10, true, &mut rng).unwrap();
        let mut questions: Vec<String> = session.into_iter().map(|c| c.question).collect();
        questions.sort();
        let mut expected: Vec<String> = deck.into_iter().map(|c| c.question).collect();
        expected.sort();
        assert_eq!(questions, expected);
    }

    #[test]
    fn test_empty_deck_is_an_error() {
        let store = MasteryStore::in_memory();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = build_session(&[], &store, 5, false, &mut rng).unwrap_err();
        assert!(matches!(err, StudyError::EmptyDeck));
    }

    #[test]
    fn test_clamp_length() {
        assert_eq!(clamp_length(0), 1);
        assert_eq!(clamp_length(7), 7);
        assert_eq!(clamp_length(100), MAX_SESSION_LENGTH);
    }
}
