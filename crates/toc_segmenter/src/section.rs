// src/section.rs

use serde::{Deserialize, Serialize};

/// One titled section of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    /// Section text with surrounding whitespace trimmed
    pub content: String,
    /// Byte offset where the untrimmed span starts in the source text
    pub start: usize,
    /// Byte offset where the untrimmed span ends (exclusive)
    pub end: usize,
}

impl Section {
    pub(crate) fn from_span(title: impl Into<String>, text: &str, start: usize, end: usize) -> Self {
        Self {
            title: title.into(),
            content: text[start..end].trim().to_string(),
            start,
            end,
        }
    }
}

/// Sections of one document together with how well its titles matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segmentation {
    pub sections: Vec<Section>,
    /// Number of cleaned titles that produced a boundary
    pub matched_titles: usize,
    /// Cleaned titles that could not be located after the search cursor
    pub skipped_titles: Vec<String>,
}

impl Segmentation {
    /// Share of cleaned titles that were located, `1.0` when there were none.
    pub fn match_rate(&self) -> f64 {
        let total = self.matched_titles + self.skipped_titles.len();
        if total == 0 {
            return 1.0;
        }
        self.matched_titles as f64 / total as f64
    }

    /// True when no title matched and the whole text became one section.
    pub fn is_fallback(&self) -> bool {
        self.matched_titles == 0
    }
}
