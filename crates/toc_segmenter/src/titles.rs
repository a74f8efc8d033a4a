// src/titles.rs

//! Filtering of candidate titles before matching.

use once_cell::sync::Lazy;
use regex::Regex;

/// A whole entry made of 3+ decorative separator characters.
static SEPARATOR_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[_\-–—=~.]{3,}$").expect("separator pattern is valid"));

/// Whether a (trimmed) title is a decorative separator line such as `"-----"`.
pub fn is_separator_run(title: &str) -> bool {
    SEPARATOR_RUN.is_match(title.trim())
}

/// Drop empty entries and separator lines, keeping order.
///
/// Entries are never modified, only dropped, so cleaning an already cleaned
/// list returns it unchanged.
///
/// ```rust
/// use toc_segmenter::clean_titles;
///
/// let raw = ["Préambule", "  ", "______", "---Annexe 1---", "Article 1"];
/// assert_eq!(
///     clean_titles(&raw),
///     vec!["Préambule", "---Annexe 1---", "Article 1"]
/// );
/// ```
pub fn clean_titles<S: AsRef<str>>(titles: &[S]) -> Vec<&str> {
    titles
        .iter()
        .map(|title| title.as_ref())
        .filter(|title| {
            let trimmed = title.trim();
            !trimmed.is_empty() && !SEPARATOR_RUN.is_match(trimmed)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_runs() {
        for run in ["---", "______", "....", "===", "~~~", "—–—", "-_=.~", "  ----  "] {
            assert!(is_separator_run(run), "{run:?} should be a separator run");
        }
    }

    #[test]
    fn test_not_separator_runs() {
        for title in ["--", "..", "---Annexe 1---", "1.1.", "Article 1", "", "- - -"] {
            assert!(!is_separator_run(title), "{title:?} is not a separator run");
        }
    }

    #[test]
    fn test_clean_drops_empty_and_whitespace() {
        let raw = ["", "   ", "\t\n", "Article 1"];
        assert_eq!(clean_titles(&raw), vec!["Article 1"]);
    }

    #[test]
    fn test_clean_keeps_entries_unmodified() {
        let raw = vec![String::from("  Article 1 "), String::from("Article 2")];
        assert_eq!(clean_titles(&raw), vec!["  Article 1 ", "Article 2"]);
    }

    #[test]
    fn test_clean_is_idempotent() {
        let raw = ["Titre I", "----", "", "Titre II", "~~~~~~", "Annexe"];
        let once = clean_titles(&raw);
        let twice = clean_titles(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clean_empty_list() {
        let raw: Vec<String> = Vec::new();
        assert!(clean_titles(&raw).is_empty());
    }
}
