//! Integration tests reading whole extraction archives.

use std::io::{Cursor, Write};

use pdfsift::info::{DocumentInfo, StructuredDocumentInfo};
use pdfsift::parser::MANIFEST_NAME;
use pdfsift::{extract_bytes, extract_file, ClassifyOptions, Error, ExtractArchive};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn build_archive(manifest: &str, resources: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file(MANIFEST_NAME, SimpleFileOptions::default())
        .unwrap();
    zip.write_all(manifest.as_bytes()).unwrap();
    for (name, data) in resources {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(data.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

const PAPER: &str = r#"{
  "version": {"json_export": "1.0"},
  "elements": [
    {"Path": "//Document/Title", "Text": "Structured Extraction "},
    {"Path": "//Document/H1", "Text": "Introduction"},
    {"Path": "//Document/P", "Text": "We study archives."},
    {"Path": "//Document/Figure", "filePaths": ["figures/fig0.png"]},
    {"Path": "//Document/Table", "filePaths": ["tables/fileoutpart0.csv", "tables/fileoutpart0.png"]},
    {"Path": "//Document/Table/TR/TH/P", "Text": "Name"},
    {"Path": "//Document/H2", "Text": "Method"},
    {"Path": "//Document/L/LI/LBody", "Text": "first step"},
    {"Path": "//Document/Table[2]", "filePaths": ["tables/fileoutpart1.csv"]},
    {"Path": "//Document/Table[3]", "filePaths": ["tables/fileoutpart2.csv"]},
    {"Path": "//Document/H1", "Text": "References"},
    {"Path": "//Document/L[2]/LI/LBody", "Text": "Smith, J. Archives. 2020"},
    {"Path": "//Document/L[2]/LI/LBody", "Text": "Doe, A. Streams. 2019"},
    {"Path": "//Document/L[2]/LI/LBody", "Text": "[1]"}
  ]
}"#;

fn paper_archive() -> Vec<u8> {
    build_archive(
        PAPER,
        &[
            ("tables/fileoutpart0.csv", "\u{feff}Name,Score\nalpha,1\nbeta,2\n"),
            ("tables/fileoutpart1.csv", "a,b\n1,2,3\n"),
            ("tables/fileoutpart2.csv", "x,,x\n1,2\n"),
            ("figures/fig0.png", "\u{89}PNG figure"),
            ("tables/fileoutpart0.png", "\u{89}PNG table"),
        ],
    )
}

#[test]
fn test_full_document() {
    let doc = extract_bytes(&paper_archive()).unwrap();

    assert_eq!(doc.title, "Structured Extraction ");

    let titles: Vec<&str> = doc.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Introduction", "Method"]);
    assert_eq!(doc.sections[0].content, vec!["We study archives."]);
    assert_eq!(doc.sections[1].content, vec!["first step"]);

    assert_eq!(
        doc.references,
        vec!["Smith, J. Archives. 2020", "Doe, A. Streams. 2019"]
    );
}

#[test]
fn test_corrupted_table_does_not_block_others() {
    let doc = extract_bytes(&paper_archive()).unwrap();

    assert_eq!(doc.tables.len(), 2);

    let first = &doc.tables[0];
    assert_eq!(first.columns, vec!["Name", "Score"]);
    assert_eq!(first.column("Score"), Some(vec!["1", "2"]));

    let third = &doc.tables[1];
    assert_eq!(third.columns, vec!["x", "Unnamed: 1", "x.1"]);
    assert_eq!(third.cell(0, 2), Some(""));
}

#[test]
fn test_table_harvest_is_idempotent() {
    let info =
        StructuredDocumentInfo::from_bytes(&paper_archive(), ClassifyOptions::default()).unwrap();
    assert_eq!(info.tables(), info.tables());
}

#[test]
fn test_figures_and_image_renditions_are_not_loaded() {
    let data = paper_archive();

    let mut zip = zip::ZipArchive::new(Cursor::new(&data)).unwrap();
    assert!(zip.by_name("figures/fig0.png").is_ok());
    assert!(zip.by_name("tables/fileoutpart0.png").is_ok());

    let archive = ExtractArchive::from_bytes(&data).unwrap();
    let mut names: Vec<&str> = archive.resource_names().collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec![
            "tables/fileoutpart0.csv",
            "tables/fileoutpart1.csv",
            "tables/fileoutpart2.csv"
        ]
    );
}

#[test]
fn test_title_only_archive() {
    let data = build_archive(
        r#"{"elements": [{"Path": "//Document/Title", "Text": "My Paper"}]}"#,
        &[],
    );
    let doc = extract_bytes(&data).unwrap();

    assert_eq!(doc.title, "My Paper");
    assert!(doc.sections.is_empty());
    assert!(doc.tables.is_empty());
    assert!(doc.references.is_empty());
}

#[test]
fn test_malformed_archives() {
    let missing = build_archive_without_manifest();
    assert!(matches!(
        extract_bytes(&missing),
        Err(Error::MalformedArchive(_))
    ));

    let invalid = build_archive("[1, 2", &[]);
    assert!(matches!(
        extract_bytes(&invalid),
        Err(Error::MalformedArchive(_))
    ));

    assert!(matches!(
        extract_bytes(b"plain bytes"),
        Err(Error::MalformedArchive(_))
    ));
}

fn build_archive_without_manifest() -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("tables/fileoutpart0.csv", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"a\n1\n").unwrap();
    zip.finish().unwrap().into_inner()
}

#[test]
fn test_extract_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paper.zip");
    std::fs::write(&path, paper_archive()).unwrap();

    let from_file = extract_file(&path).unwrap();
    let from_bytes = extract_bytes(&paper_archive()).unwrap();
    assert_eq!(from_file, from_bytes);
}

#[test]
fn test_json_output_shape() {
    let doc = extract_bytes(&paper_archive()).unwrap();
    let json = pdfsift::render::to_json(&doc, pdfsift::JsonFormat::Compact).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["title"], "Structured Extraction ");
    assert_eq!(value["sections"][1]["title"], "Method");
    assert_eq!(value["tables"][0][1]["Name"], "beta");
    assert_eq!(value["references"].as_array().unwrap().len(), 2);
}
