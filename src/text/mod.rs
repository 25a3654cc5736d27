pub mod focal;
pub mod markdown;
pub mod tokenizer;

pub use focal::{focal_index, split_at_focal};
pub use markdown::strip;
pub use tokenizer::{tokenize, Word};
