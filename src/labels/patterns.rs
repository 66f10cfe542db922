//! Compiled patterns for label cleaning.
//!
//! The separator set and the blank-line set are kept as two distinct lists:
//! the blank set additionally treats `.` as leftover punctuation.

use once_cell::sync::Lazy;
use regex::Regex;

/// Runs of separators, together with the whitespace around them
pub static SYMBOL_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[,;:–<>=]+\s*").expect("valid separator pattern"));

/// ASCII digits only
pub static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").expect("valid digit pattern"));

pub static LINKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("valid link pattern"));

/// Lines holding nothing but whitespace and leftover punctuation
pub static BLANK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s.:;,–<>=]*$").expect("valid blank pattern"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_set() {
        let parts: Vec<&str> = SYMBOL_SEPARATORS.split("a, b;c : d – e<f>g=h-i").collect();
        assert_eq!(parts, vec!["a", "b", "c", "d", "e", "f", "g", "h-i"]);
    }

    #[test]
    fn test_blank_set() {
        assert!(BLANK_LINE.is_match(""));
        assert!(BLANK_LINE.is_match(" .:; ,–<>= "));
        assert!(!BLANK_LINE.is_match("-"));
        assert!(!BLANK_LINE.is_match("a."));
    }

    #[test]
    fn test_links() {
        assert_eq!(LINKS.replace_all("see http://a.b/c?d=1 and https://x.y", ""), "see  and ");
    }
}
