// src/normalize.rs

//! Case and diacritic folding used to compare titles against document text.
//!
//! Lowercasing and accent stripping do not preserve byte length (`É` is two
//! bytes, `e` is one; `İ` lowercases to three bytes). [`FoldedText`] keeps a
//! per-byte map back to the original text so that a hit in the folded copy
//! can be turned into a slicing offset in the original.

use unicode_normalization::char::{decompose_canonical, is_combining_mark};

/// Which folding to apply to a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fold {
    /// Lowercase only.
    Lowercase,
    /// Lowercase and strip diacritics to base Latin letters.
    Normalized,
}

/// Comparison key for a title: trimmed, lowercased, accent-stripped.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
///
/// ```rust
/// use toc_segmenter::normalize;
///
/// assert_eq!(normalize("  Préambule "), "preambule");
/// assert_eq!(normalize("Œuvres sociales"), "oeuvres sociales");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.trim().chars() {
        push_normalized(c, &mut out);
    }
    out.trim().to_string()
}

/// Link-target slug for a section title.
///
/// ```rust
/// use toc_segmenter::anchor;
///
/// assert_eq!(anchor("Article 2 - Durée"), "article-2---duree");
/// ```
pub fn anchor(title: &str) -> String {
    normalize(title).replace(' ', "-")
}

fn push_normalized(c: char, out: &mut String) {
    for lower in c.to_lowercase() {
        match lower {
            'œ' => out.push_str("oe"),
            'æ' => out.push_str("ae"),
            'ß' => out.push_str("ss"),
            'ø' => out.push('o'),
            'đ' => out.push('d'),
            'ł' => out.push('l'),
            '\u{2018}' | '\u{2019}' | '\u{02BC}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{00A0}' | '\u{202F}' => out.push(' '),
            _ => decompose_canonical(lower, |part| {
                if !is_combining_mark(part) {
                    out.push(part);
                }
            }),
        }
    }
}

/// A folded copy of a text with a map from folded bytes to original offsets.
#[derive(Debug, Clone)]
pub struct FoldedText {
    folded: String,
    /// `origins[i]` is the byte offset, in the original text, of the `char`
    /// that produced folded byte `i`. Non-decreasing.
    origins: Vec<usize>,
}

impl FoldedText {
    pub fn new(text: &str, fold: Fold) -> Self {
        let mut folded = String::with_capacity(text.len());
        let mut origins = Vec::with_capacity(text.len());

        for (offset, c) in text.char_indices() {
            match fold {
                Fold::Lowercase => folded.extend(c.to_lowercase()),
                Fold::Normalized => push_normalized(c, &mut folded),
            }
            origins.resize(folded.len(), offset);
        }

        Self { folded, origins }
    }

    /// Find `needle` (already folded) at or after original offset `cursor`.
    ///
    /// Returns the original byte offset of the `char` where the hit starts.
    /// An empty needle never matches.
    pub fn find_from(&self, needle: &str, cursor: usize) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        // All bytes of one original char share an origin, so the first byte
        // whose origin reaches the cursor is a char boundary in `folded`.
        let start = self.origins.partition_point(|&origin| origin < cursor);
        self.folded[start..]
            .find(needle)
            .map(|hit| self.origins[start + hit])
    }
}
