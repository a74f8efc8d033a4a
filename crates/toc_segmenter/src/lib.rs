// src/lib.rs
//! # TOC Segmenter
//!
//! Splits collective-agreement documents into titled sections, using the
//! (noisy) table of contents extracted for each document. The sections are
//! the unit that is later chunked and embedded for retrieval.
//!
//! ## Features
//!
//! - **Noise-tolerant title matching**: case and accent-insensitive search,
//!   decorative separator lines and empty titles filtered out
//! - **Ordered matching**: each title is searched after the previous one,
//!   so a title quoted early in the text does not steal the boundary
//! - **Short-span merging**: heading / sub-heading pairs that bound
//!   near-empty spans are fused into one section
//! - **Full coverage**: sections tile the whole text; with no usable title
//!   the document is kept as a single section
//! - **Batch mode**: parallel segmentation of a document collection
//!
//! ## Quick Start
//!
//! ```rust
//! use toc_segmenter::Segmenter;
//!
//! let text = "Entre les soussignés...\nArticle 1 - Objet\nLe présent accord...";
//! let titles = ["Article 1 - Objet", "-----"];
//! let segmenter = Segmenter::default();
//!
//! for section in segmenter.segment(text, &titles) {
//!     println!("{}: {} chars", section.title, section.content.len());
//! }
//! ```
//!
//! ## Custom Configuration
//!
//! ```rust
//! use toc_segmenter::Segmenter;
//!
//! let segmenter = Segmenter::builder()
//!     .merge_threshold(300)
//!     .intro_title("Préambule")
//!     .build();
//!
//! let report = segmenter.segment_with_report("Texte sans titres", &["Article 1"]);
//! assert!(report.is_fallback());
//! assert_eq!(report.skipped_titles, vec!["Article 1".to_string()]);
//! ```

pub mod batch;
pub mod normalize;
pub mod section;
pub mod segmenter;
pub mod titles;

pub use batch::{BatchStats, DocumentSections, IndexedSection, SourceDocument};
pub use normalize::{anchor, normalize};
pub use section::{Section, Segmentation};
pub use segmenter::{
    Segmenter, SegmenterBuilder, DEFAULT_FALLBACK_TITLE, DEFAULT_INTRO_TITLE,
    DEFAULT_MERGE_THRESHOLD, DEFAULT_TITLE_SEPARATOR,
};
pub use titles::{clean_titles, is_separator_run};
