use rand::Rng;
use std::collections::HashSet;

use super::shuffle::shuffle;

/// Build the options for a multiple-choice question.
///
/// The correct answer is always included. Up to `count - 1` distinct wrong
/// answers are sampled from `pool`, so fewer than `count` options come back
/// when the pool runs short. Option order is random.
pub fn build_choices<'p, R: Rng + ?Sized>(
    correct: &str,
    pool: impl IntoIterator<Item = &'p str>,
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut wrong: Vec<&str> = pool
        .into_iter()
        .filter(|answer| *answer != correct && seen.insert(*answer))
        .collect();

    shuffle(&mut wrong, rng);
    wrong.truncate(count.saturating_sub(1));

    let mut choices: Vec<String> = wrong.into_iter().map(str::to_string).collect();
    choices.push(correct.to_string());
    shuffle(&mut choices, rng);

    choices
}
