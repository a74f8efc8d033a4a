//! JSON Lines input and output.
//!
//! Input: one `SourceDocument` per line. Output: one `IndexedSection` per
//! line, documents in input order, sections in document order.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use toc_segmenter::{DocumentSections, SourceDocument};

/// Open a file for reading, or stdin when no path is given.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Create a file for writing, or stdout when no path is given.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Parse JSON Lines documents. Blank lines are ignored.
pub fn read_documents<R: BufRead>(reader: R) -> Result<Vec<SourceDocument>> {
    let mut documents = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read input line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let document: SourceDocument = serde_json::from_str(&line)
            .with_context(|| format!("Invalid document record on line {line_no}"))?;
        documents.push(document);
    }
    tracing::debug!("Read {} documents", documents.len());
    Ok(documents)
}

/// Write every section of every document as one JSON line.
///
/// Returns the number of rows written.
pub fn write_sections<W: Write>(mut writer: W, results: &[DocumentSections]) -> Result<usize> {
    let mut rows = 0;
    for document in results {
        for row in document.indexed() {
            serde_json::to_writer(&mut writer, &row)
                .with_context(|| format!("Failed to serialize section of {}", document.id))?;
            writer.write_all(b"\n").context("Failed to write output")?;
            rows += 1;
        }
    }
    writer.flush().context("Failed to flush output")?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use toc_segmenter::{IndexedSection, Segmenter};

    #[test]
    fn test_read_documents_skips_blank_lines() {
        let input = "{\"id\": \"1\", \"text\": \"a\", \"titles\": []}\n\n   \n{\"numdossier\": \"2\", \"accorddocx\": \"b\"}\n";
        let documents = read_documents(input.as_bytes()).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[1].id, "2");
        assert_eq!(documents[1].text, "b");
    }

    #[test]
    fn test_read_documents_reports_line_number() {
        let input = "{\"id\": \"1\", \"text\": \"a\"}\n{not json}\n";
        let err = read_documents(input.as_bytes()).unwrap_err();
        assert!(format!("{err}").contains("line 2"), "unexpected error: {err}");
    }

    #[test]
    fn test_write_sections_one_row_per_line() {
        let documents = vec![
            SourceDocument {
                id: "A".to_string(),
                text: "Texte sans titre".to_string(),
                titles: vec![],
            },
            SourceDocument {
                id: "B".to_string(),
                text: format!("{}\nArticle 1\n{}", "x".repeat(200), "y".repeat(200)),
                titles: vec!["Article 1".to_string()],
            },
        ];
        let results = Segmenter::default().segment_documents(&documents);

        let mut out = Vec::new();
        let rows = write_sections(&mut out, &results).unwrap();
        assert_eq!(rows, 3);

        let parsed: Vec<IndexedSection> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed[0].doc_id, "A");
        assert_eq!(parsed[0].title, "Document complet");
        assert_eq!((parsed[2].doc_id.as_str(), parsed[2].seq), ("B", 1));
        assert_eq!(parsed[2].title, "Article 1");
    }
}
