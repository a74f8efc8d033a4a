use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn bin(config_dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_toc-split"));
    // Never pick up the user's config
    cmd.arg("--config").arg(config_dir.join("absent.toml"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn agreement() -> String {
    let clause = "Les dispositions du présent article s'appliquent à tous les salariés. ";
    format!(
        "Entre les soussignés. {intro}\nPréambule\n{body}\nTitre I\nArticle 1 – Objet\n{body}\nArticle 2 – Durée\n{body}",
        intro = clause.repeat(2),
        body = clause.repeat(3),
    )
}

fn write_input(dir: &TempDir) -> PathBuf {
    let records = [
        json!({
            "id": "T001",
            "text": agreement(),
            "titles": ["Préambule", "-----", "Titre I", "Article 1 – Objet", "Article 2 – Durée"],
        }),
        json!({
            "numdossier": "T002",
            "accorddocx": "Un accord sans sommaire exploitable.",
            "extracted_summary": ["Chapitre 9"],
        }),
    ];
    let lines: Vec<String> = records.iter().map(Value::to_string).collect();
    let path = dir.path().join("documents.jsonl");
    std::fs::write(&path, lines.join("\n") + "\n").unwrap();
    path
}

fn parse_rows(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn split_writes_one_row_per_section() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir);

    let assert = bin(dir.path())
        .args(["split", "-q", "-i"])
        .arg(&input)
        .assert()
        .success();

    let rows = parse_rows(&assert.get_output().stdout);
    let titles: Vec<&str> = rows.iter().map(|row| row["title"].as_str().unwrap()).collect();
    assert_eq!(
        titles,
        vec![
            "Introduction",
            "Préambule",
            "Titre I - Article 1 – Objet",
            "Article 2 – Durée",
            "Document complet",
        ]
    );
    assert_eq!(rows[3]["doc_id"], "T001");
    assert_eq!(rows[3]["seq"], 3);
    assert_eq!(rows[4]["doc_id"], "T002");
    assert_eq!(rows[4]["seq"], 0);
    assert_eq!(rows[1]["anchor"], "preambule");
}

#[test]
fn split_reads_stdin_and_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = std::fs::read_to_string(write_input(&dir)).unwrap();
    let output = dir.path().join("sections.jsonl");

    bin(dir.path())
        .args(["split", "--merge-threshold", "0", "-o"])
        .arg(&output)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("2 documents, 6 sections"));

    let rows = parse_rows(&std::fs::read(&output).unwrap());
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[2]["title"], "Titre I");
    assert_eq!(rows[3]["title"], "Article 1 – Objet");
}

#[test]
fn split_uses_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir);
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        "[segmentation]\nmerge_threshold = 0\nintro_title = \"Début\"\n",
    )
    .unwrap();

    let assert = Command::new(env!("CARGO_BIN_EXE_toc-split"))
        .arg("--config")
        .arg(&config)
        .args(["split", "-q", "-i"])
        .arg(&input)
        .assert()
        .success();

    let rows = parse_rows(&assert.get_output().stdout);
    assert_eq!(rows[0]["title"], "Début");
    assert_eq!(rows.len(), 6);
}

#[test]
fn split_rejects_malformed_record() {
    let dir = tempfile::tempdir().unwrap();
    bin(dir.path())
        .args(["split", "-q"])
        .write_stdin("{\"id\": \"1\", \"text\": \"a\"}\n{oops\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn show_renders_sections() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir);

    bin(dir.path())
        .args(["show", "T001", "-i"])
        .arg(&input)
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Accord n° T001"))
        .stdout(predicate::str::contains("[2] Titre I - Article 1 – Objet"))
        .stdout(predicate::str::contains("#preambule"));
}

#[test]
fn show_json_reports_skipped_titles() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir);

    let assert = bin(dir.path())
        .args(["show", "T002", "--json", "-i"])
        .arg(&input)
        .assert()
        .success();

    let report: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["id"], "T002");
    assert_eq!(report["matched_titles"], 0);
    assert_eq!(report["skipped_titles"], json!(["Chapitre 9"]));
    assert_eq!(report["sections"][0]["title"], "Document complet");
    assert_eq!(
        report["sections"][0]["content"],
        "Un accord sans sommaire exploitable."
    );
}

#[test]
fn show_unknown_document_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir);

    bin(dir.path())
        .args(["show", "T999", "-i"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Document not found: T999"));
}

#[test]
fn completions_are_generated() {
    let dir = tempfile::tempdir().unwrap();
    bin(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("toc-split"));
}
