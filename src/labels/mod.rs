pub mod extractor;
pub mod patterns;

pub use extractor::{raw_options_from_text, LabelCandidateExtractor, LabelCandidateSet};
