// src/batch.rs

//! Segmentation of a whole document collection.
//!
//! Documents are independent, so the collection is mapped in parallel with
//! rayon; the output keeps the input order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::normalize::anchor;
use crate::section::{Section, Segmentation};
use crate::segmenter::Segmenter;

/// One agreement as produced by the extraction step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Case number of the agreement
    #[serde(alias = "numdossier", alias = "num_dossier")]
    pub id: String,
    /// Full extracted text
    #[serde(alias = "accorddocx")]
    pub text: String,
    /// Candidate section titles, in table-of-contents order
    #[serde(default, alias = "extracted_summary")]
    pub titles: Vec<String>,
}

/// Sections of one document of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSections {
    pub id: String,
    pub sections: Vec<Section>,
    pub matched_titles: usize,
    pub skipped_titles: Vec<String>,
}

impl DocumentSections {
    pub fn new(id: impl Into<String>, segmentation: Segmentation) -> Self {
        Self {
            id: id.into(),
            sections: segmentation.sections,
            matched_titles: segmentation.matched_titles,
            skipped_titles: segmentation.skipped_titles,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.matched_titles == 0
    }

    /// Rows for the vector store, numbered from 0 in document order.
    pub fn indexed(&self) -> impl Iterator<Item = IndexedSection> + '_ {
        self.sections
            .iter()
            .enumerate()
            .map(move |(seq, section)| IndexedSection {
                doc_id: self.id.clone(),
                seq,
                title: section.title.clone(),
                anchor: anchor(&section.title),
                content: section.content.clone(),
            })
    }
}

/// A section ready to be chunked and embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedSection {
    pub doc_id: String,
    /// Position of the section within its document
    pub seq: usize,
    pub title: String,
    pub anchor: String,
    pub content: String,
}

/// Totals over a segmented batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BatchStats {
    pub documents: usize,
    pub sections: usize,
    pub matched_titles: usize,
    pub skipped_titles: usize,
    /// Documents that came out as a single whole-document section
    pub fallbacks: usize,
}

impl BatchStats {
    pub fn match_rate(&self) -> f64 {
        let total = self.matched_titles + self.skipped_titles;
        if total == 0 {
            return 1.0;
        }
        self.matched_titles as f64 / total as f64
    }
}

impl From<&[DocumentSections]> for BatchStats {
    fn from(results: &[DocumentSections]) -> Self {
        results.iter().fold(Self::default(), |mut stats, doc| {
            stats.documents += 1;
            stats.sections += doc.sections.len();
            stats.matched_titles += doc.matched_titles;
            stats.skipped_titles += doc.skipped_titles.len();
            if doc.is_fallback() {
                stats.fallbacks += 1;
            }
            stats
        })
    }
}

impl Segmenter {
    /// Segment every document, in parallel, preserving input order.
    pub fn segment_documents(&self, documents: &[SourceDocument]) -> Vec<DocumentSections> {
        let results: Vec<DocumentSections> = documents
            .par_iter()
            .map(|doc| {
                let segmentation = self.segment_with_report(&doc.text, &doc.titles);
                DocumentSections::new(doc.id.clone(), segmentation)
            })
            .collect();

        let stats = BatchStats::from(results.as_slice());
        tracing::info!(
            "Segmented {} documents into {} sections ({} titles matched, {} skipped, {} without any match)",
            stats.documents,
            stats.sections,
            stats.matched_titles,
            stats.skipped_titles,
            stats.fallbacks
        );

        results
    }
}
