pub mod extractor;
pub mod text;

pub use extractor::extract_cards;
pub use text::read_notes;
