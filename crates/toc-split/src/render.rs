//! Human-readable rendering of one document's sections.

use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use toc_segmenter::{anchor, DocumentSections};

pub fn render_document<W: Write>(out: &mut W, document: &DocumentSections) -> Result<()> {
    writeln!(out, "{} {}", "Accord n°".bold(), document.id.bold())?;
    writeln!(
        out,
        "{} sections, {} titles matched, {} skipped",
        document.sections.len(),
        document.matched_titles,
        document.skipped_titles.len()
    )?;

    for (seq, section) in document.sections.iter().enumerate() {
        writeln!(out)?;
        writeln!(
            out,
            "{} {} {}",
            format!("[{seq}]").dimmed(),
            section.title.green().bold(),
            format!("#{}", anchor(&section.title)).dimmed()
        )?;
        writeln!(out, "{}", section.content)?;
    }

    if !document.skipped_titles.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "Titles not found:".yellow())?;
        for title in &document.skipped_titles {
            writeln!(out, "  - {title}")?;
        }
    }

    Ok(())
}
