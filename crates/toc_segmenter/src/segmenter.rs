// src/segmenter.rs

//! Table-of-contents driven segmentation.
//!
//! Titles are located in the order they are listed: each title is searched
//! only at or after the position of the previously located one. A title that
//! cannot be found is skipped. Spans between located titles become sections;
//! spans shorter than the merge threshold are fused with the following span,
//! since the upstream table of contents tends to list a heading and its first
//! sub-heading as separate entries.

use crate::normalize::{normalize, Fold, FoldedText};
use crate::section::{Section, Segmentation};
use crate::titles::clean_titles;

/// Default minimum span length, in chars, below which a span is merged forward
pub const DEFAULT_MERGE_THRESHOLD: usize = 150;

/// Title of the span that precedes the first located title
pub const DEFAULT_INTRO_TITLE: &str = "Introduction";

/// Title of the single section produced when no title could be located
pub const DEFAULT_FALLBACK_TITLE: &str = "Document complet";

/// Joins the titles of two merged spans
pub const DEFAULT_TITLE_SEPARATOR: &str = " - ";

/// Splits a document into titled sections.
///
/// ```rust
/// use toc_segmenter::Segmenter;
///
/// let text = "Préambule. Les parties conviennent de ce qui suit.\nArticle 1 - Objet\n...";
/// let sections = Segmenter::default().segment(text, &["Article 1 - Objet"]);
/// assert!(!sections.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Segmenter {
    merge_threshold: usize,
    intro_title: String,
    fallback_title: String,
    title_separator: String,
    require_literal_match: bool,
}

impl Default for Segmenter {
    /// Default configuration:
    /// - merge_threshold: 150
    /// - intro_title: "Introduction"
    /// - fallback_title: "Document complet"
    /// - title_separator: " - "
    /// - require_literal_match: true
    fn default() -> Self {
        SegmenterBuilder::new().build()
    }
}

/// A located title.
#[derive(Debug, Clone, Copy)]
struct Boundary<'t> {
    offset: usize,
    /// `None` for the lead-in span before the first located title
    title: Option<&'t str>,
}

impl Segmenter {
    pub fn builder() -> SegmenterBuilder {
        SegmenterBuilder::new()
    }

    pub fn merge_threshold(&self) -> usize {
        self.merge_threshold
    }

    /// Split `text` into sections using the candidate `titles`.
    ///
    /// Titles are trimmed before they are searched for, and section titles
    /// are the trimmed entries. Never fails and never returns an empty list.
    pub fn segment<S: AsRef<str>>(&self, text: &str, titles: &[S]) -> Vec<Section> {
        self.segment_with_report(text, titles).sections
    }

    /// Like [`Segmenter::segment`], also reporting which titles were skipped.
    pub fn segment_with_report<S: AsRef<str>>(&self, text: &str, titles: &[S]) -> Segmentation {
        let cleaned = clean_titles(titles);
        let (boundaries, skipped_titles) = self.locate_titles(text, &cleaned);

        if boundaries.is_empty() {
            if !cleaned.is_empty() {
                tracing::warn!(
                    "None of {} titles found in {} chars of text, keeping the whole document",
                    cleaned.len(),
                    text.len()
                );
            }
            // Whole text kept verbatim
            let whole = Section {
                title: self.fallback_title.clone(),
                content: text.to_string(),
                start: 0,
                end: text.len(),
            };
            return Segmentation {
                sections: vec![whole],
                matched_titles: 0,
                skipped_titles,
            };
        }

        let matched_titles = boundaries.len();
        Segmentation {
            sections: self.build_sections(text, boundaries),
            matched_titles,
            skipped_titles,
        }
    }

    fn locate_titles<'t>(
        &self,
        text: &str,
        titles: &[&'t str],
    ) -> (Vec<Boundary<'t>>, Vec<String>) {
        let normalized = FoldedText::new(text, Fold::Normalized);
        let lowered = self
            .require_literal_match
            .then(|| FoldedText::new(text, Fold::Lowercase));

        let mut boundaries = Vec::new();
        let mut skipped = Vec::new();
        let mut cursor = 0;

        for &title in titles {
            let title = title.trim();
            let Some(hit) = normalized.find_from(&normalize(title), cursor) else {
                tracing::debug!("Title not found after offset {}: {:?}", cursor, title);
                skipped.push(title.to_string());
                continue;
            };

            let position = match &lowered {
                Some(lowered) => {
                    let needle: String = title.chars().flat_map(char::to_lowercase).collect();
                    lowered.find_from(&needle, cursor)
                }
                None => Some(hit),
            };
            let Some(position) = position else {
                tracing::debug!(
                    "Title only matches after accent folding, skipping: {:?}",
                    title
                );
                skipped.push(title.to_string());
                continue;
            };

            boundaries.push(Boundary {
                offset: position,
                title: Some(title),
            });
            cursor = position + text[position..].chars().next().map_or(1, char::len_utf8);
        }

        (boundaries, skipped)
    }

    fn build_sections(&self, text: &str, mut boundaries: Vec<Boundary<'_>>) -> Vec<Section> {
        // Always present, even when a title sits at offset 0: the empty
        // lead-in then merges forward and carries that title alone
        boundaries.insert(0, Boundary { offset: 0, title: None });

        let span_end = |i: usize| boundaries.get(i + 1).map_or(text.len(), |next| next.offset);

        let mut sections = Vec::with_capacity(boundaries.len());
        let mut i = 0;
        while i < boundaries.len() {
            let start = boundaries[i].offset;
            let end = span_end(i);

            if self.is_short(&text[start..end]) && i + 1 < boundaries.len() {
                let next_title = self.title_of(&boundaries[i + 1]);
                let title = match boundaries[i].title {
                    Some(title) => format!("{title}{}{next_title}", self.title_separator),
                    None => next_title.to_string(),
                };
                sections.push(Section::from_span(title, text, start, span_end(i + 1)));
                i += 2;
            } else {
                sections.push(Section::from_span(self.title_of(&boundaries[i]), text, start, end));
                i += 1;
            }
        }

        sections
    }

    fn title_of<'a>(&'a self, boundary: &Boundary<'a>) -> &'a str {
        boundary.title.unwrap_or(&self.intro_title)
    }

    fn is_short(&self, span: &str) -> bool {
        span.chars().take(self.merge_threshold).count() < self.merge_threshold
    }
}

/// Builder for configuring a [`Segmenter`].
#[derive(Debug, Clone)]
pub struct SegmenterBuilder {
    merge_threshold: usize,
    intro_title: String,
    fallback_title: String,
    title_separator: String,
    require_literal_match: bool,
}

impl SegmenterBuilder {
    pub fn new() -> Self {
        Self {
            merge_threshold: DEFAULT_MERGE_THRESHOLD,
            intro_title: DEFAULT_INTRO_TITLE.to_string(),
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
            title_separator: DEFAULT_TITLE_SEPARATOR.to_string(),
            require_literal_match: true,
        }
    }

    /// Spans shorter than this many chars are merged with the next span.
    ///
    /// `0` disables merging. Default: 150
    pub fn merge_threshold(mut self, chars: usize) -> Self {
        self.merge_threshold = chars;
        self
    }

    /// Default: "Introduction"
    pub fn intro_title(mut self, title: impl Into<String>) -> Self {
        self.intro_title = title.into();
        self
    }

    /// Default: "Document complet"
    pub fn fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = title.into();
        self
    }

    /// Default: " - "
    pub fn title_separator(mut self, separator: impl Into<String>) -> Self {
        self.title_separator = separator.into();
        self
    }

    /// Require the title to also occur with its accents intact.
    ///
    /// When enabled, accent-insensitive matching only decides whether a
    /// title is present; the boundary is placed where the lowercased title
    /// occurs literally, and the title is skipped if it never does. When
    /// disabled, the accent-insensitive hit itself is the boundary.
    ///
    /// Default: true
    pub fn require_literal_match(mut self, require: bool) -> Self {
        self.require_literal_match = require;
        self
    }

    pub fn build(self) -> Segmenter {
        Segmenter {
            merge_threshold: self.merge_threshold,
            intro_title: self.intro_title,
            fallback_title: self.fallback_title,
            title_separator: self.title_separator,
            require_literal_match: self.require_literal_match,
        }
    }
}

impl Default for SegmenterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
