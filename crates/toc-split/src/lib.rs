//! toc-split: batch front end for `toc_segmenter`.
//!
//! Reads agreement records as JSON Lines, segments them in parallel and
//! writes the resulting sections for the chunking / embedding step.

pub mod config;
pub mod records;
pub mod render;

pub use config::{default_config_path, load_config, Config};
