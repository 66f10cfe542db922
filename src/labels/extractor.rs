use serde::{Deserialize, Serialize};

use crate::config_manager::labels::LabelCleaningConfig;
use crate::labels::patterns::{BLANK_LINE, DIGITS, LINKS, SYMBOL_SEPARATORS};

/// Ordered, cleaned label suggestions for one image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelCandidateSet(Vec<String>);

impl LabelCandidateSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(|s| s.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl IntoIterator for LabelCandidateSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a LabelCandidateSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Turns raw option strings into label suggestions.
///
/// Each line goes through: digits removed, trimmed, links removed, blank
/// check, capitalized. Lines left blank are dropped; duplicates are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelCandidateExtractor {
    config: LabelCleaningConfig,
}

impl LabelCandidateExtractor {
    pub fn new(config: LabelCleaningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LabelCleaningConfig {
        &self.config
    }

    pub fn extract<I, S>(&self, raw_options: I) -> LabelCandidateSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut candidates = Vec::new();
        for raw in raw_options {
            for line in self.split_lines(raw.as_ref()) {
                if let Some(cleaned) = self.clean_line(line) {
                    candidates.push(cleaned);
                }
            }
        }
        LabelCandidateSet(candidates)
    }

    /// One raw option as candidate lines, in left-to-right order
    fn split_lines<'a>(&self, raw: &'a str) -> Vec<&'a str> {
        if self.config.split_on_symbols {
            SYMBOL_SEPARATORS
                .split(raw)
                .flat_map(|part| part.split('\n'))
                .collect()
        } else {
            raw.split('\n').collect()
        }
    }

    /// Clean a single line, or `None` if nothing worth showing is left
    pub fn clean_line(&self, line: &str) -> Option<String> {
        let mut text = line.to_string();

        if self.config.ignore_numbers {
            text = DIGITS.replace_all(&text, "").into_owned();
        }
        if self.config.strip_whitespace {
            text = text.trim().to_string();
        }
        if self.config.skip_links {
            text = LINKS.replace_all(&text, "").into_owned();
        }

        if BLANK_LINE.is_match(&text) {
            return None;
        }

        if self.config.capitalize {
            text = capitalize(&text);
        }
        Some(text)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Split a slide's text frame into trimmed, non-empty option lines
pub fn raw_options_from_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(configure: impl FnOnce(&mut LabelCleaningConfig)) -> LabelCandidateExtractor {
        let mut config = LabelCleaningConfig::none();
        configure(&mut config);
        LabelCandidateExtractor::new(config)
    }

    #[test]
    fn test_split_numbers_whitespace() {
        let ex = extractor(|c| {
            c.split_on_symbols = true;
            c.ignore_numbers = true;
            c.strip_whitespace = true;
        });
        assert_eq!(ex.extract(["Hello, World; 2024"]).into_vec(), vec!["Hello", "World"]);
    }

    #[test]
    fn test_whitespace_only_is_dropped() {
        let ex = extractor(|c| c.strip_whitespace = true);
        assert!(ex.extract(["   "]).is_empty());
    }

    #[test]
    fn test_links_keep_inner_spacing() {
        let ex = extractor(|c| {
            c.skip_links = true;
            c.strip_whitespace = true;
        });
        assert_eq!(ex.extract(["visit https://example.com now"]).into_vec(), vec!["visit  now"]);
    }

    #[test]
    fn test_link_only_line_is_dropped_before_capitalizing() {
        let ex = extractor(|c| {
            c.skip_links = true;
            c.strip_whitespace = true;
            c.capitalize = true;
        });
        assert!(ex.extract(["https://example.com/a.png"]).is_empty());
    }

    #[test]
    fn test_capitalize() {
        let ex = extractor(|c| c.capitalize = true);
        assert_eq!(ex.extract(["abc", "ABC", "éCOLE"]).into_vec(), vec!["Abc", "Abc", "École"]);
    }

    #[test]
    fn test_multiline_raw_without_split() {
        let ex = extractor(|c| c.strip_whitespace = true);
        assert_eq!(
            ex.extract(["Ramesses II\n  \nKarnak, Luxor"]).into_vec(),
            vec!["Ramesses II", "Karnak, Luxor"]
        );
    }

    #[test]
    fn test_split_expands_in_place() {
        let ex = extractor(|c| {
            c.split_on_symbols = true;
            c.strip_whitespace = true;
        });
        assert_eq!(
            ex.extract(["first", "a: b\nc", "last"]).into_vec(),
            vec!["first", "a", "b", "c", "last"]
        );
    }

    #[test]
    fn test_no_dedup_across_candidates() {
        let ex = extractor(|c| c.strip_whitespace = true);
        assert_eq!(ex.extract(["Nile", " Nile "]).into_vec(), vec!["Nile", "Nile"]);
    }

    #[test]
    fn test_punctuation_leftovers_are_blank() {
        let ex = extractor(|c| c.ignore_numbers = true);
        assert!(ex.extract(["12.", " 3 : 4 ", "–"]).is_empty());
        assert_eq!(ex.extract(["-"]).into_vec(), vec!["-"]);
    }

    #[test]
    fn test_disabled_passes_leave_text_alone() {
        let ex = extractor(|_| {});
        assert_eq!(
            ex.extract([" Photo 12 https://x.y "]).into_vec(),
            vec![" Photo 12 https://x.y "]
        );
    }

    #[test]
    fn test_second_pass_is_stable() {
        let ex = extractor(|c| {
            c.split_on_symbols = true;
            c.ignore_numbers = true;
            c.strip_whitespace = true;
            c.skip_links = true;
            c.capitalize = true;
        });
        let first = ex.extract(["the GREAT pyramid, 2560 BC; giza = EGYPT", "visit https://example.com now"]);
        let second = ex.extract(first.iter());
        assert_eq!(first, second);
        assert_eq!(
            first.into_vec(),
            vec!["The great pyramid", "Bc", "Giza", "Egypt", "Visit https", "//example.com now"]
        );
    }

    #[test]
    fn test_split_runs_before_link_removal() {
        let ex = extractor(|c| {
            c.split_on_symbols = true;
            c.skip_links = true;
        });
        // the colon in the scheme is a separator, so the link never survives intact
        assert_eq!(
            ex.extract(["see https://example.com"]).into_vec(),
            vec!["see https", "//example.com"]
        );
    }

    #[test]
    fn test_raw_options_from_text() {
        assert_eq!(
            raw_options_from_text("  Abu Simbel \r\n\n\tTemple of Ramesses II\n"),
            vec!["Abu Simbel", "Temple of Ramesses II"]
        );
        assert!(raw_options_from_text(" \n ").is_empty());
    }
}
