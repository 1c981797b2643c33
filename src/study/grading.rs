/// Multiple-choice grading: the picked option must equal the answer byte for byte
pub fn exact_match(response: &str, answer: &str) -> bool {
    response == answer
}

/// Typed grading: compare after lowercasing, dropping punctuation and
/// collapsing whitespace
pub fn typed_match(response: &str, answer: &str) -> bool {
    normalize(response) == normalize(answer)
}

pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
