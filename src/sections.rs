use std::collections::HashSet;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::chunks;
use crate::error::Result;
use crate::loader::load_document;
use crate::naming;
use crate::output::{ensure_dir, write_json, Entries};
use crate::report::RunReport;
use crate::settings::{Limits, SectionConfig};

#[derive(Debug, Serialize)]
pub struct SplitMetadata {
    pub original_file: String,
    pub split_timestamp: String,
    pub total_sections: usize,
    pub top_level_keys: Vec<String>,
    pub file_info: FileInfo,
}

#[derive(Debug, Serialize)]
pub struct FileInfo {
    pub name: String,
    #[serde(rename = "lastModified")]
    pub last_modified: String,
    pub version: String,
}

impl FileInfo {
    fn from_document(doc: &Value) -> Self {
        let field = |key: &str| match doc.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "Unknown".to_string(),
            Some(other) => other.to_string(),
        };
        FileInfo {
            name: field("name"),
            last_modified: field("lastModified"),
            version: field("version"),
        }
    }
}

/// Load the document at `cfg.input` and write one file per top-level key,
/// then `metadata.json`.
pub fn split_document(cfg: &SectionConfig) -> Result<RunReport> {
    println!("Reading {}...", cfg.input.display());
    let doc = load_document(&cfg.input)?;
    split_loaded(&doc, cfg)
}

/// Section split of an already loaded document.
pub fn split_loaded(doc: &Value, cfg: &SectionConfig) -> Result<RunReport> {
    ensure_dir(&cfg.output_dir)?;
    Ok(split_sections(doc, &cfg.input, &cfg.output_dir, &cfg.limits))
}

pub fn split_sections(doc: &Value, input: &Path, output_dir: &Path, limits: &Limits) -> RunReport {
    let mut report = RunReport::new();
    let keys: Vec<String> = doc
        .as_object()
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default();
    println!("Loaded JSON with {} top-level keys", keys.len());
    println!("Top-level keys: {:?}", keys);

    let mut sections_created = 0;
    let mut stems = HashSet::new();
    if let Some(map) = doc.as_object() {
        for (i, (key, value)) in map.iter().enumerate() {
            let stem = naming::unique_section_stem(key, i + 1, &mut stems);
            let path = output_dir.join(naming::section_file(&stem));
            let Some(bytes) = report.record(write_json(&path, &Entries(&[(key, value)])), 0) else {
                continue;
            };
            sections_created += 1;

            if bytes > limits.large_section_bytes {
                println!("  {} section is still large, attempting further split...", key);
                info!(key = %key, bytes, "section over threshold");
                chunks::split_large_section(&stem, value, output_dir, limits, &mut report);
            }
        }
    }

    let metadata = SplitMetadata {
        original_file: input.display().to_string(),
        split_timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        total_sections: sections_created,
        top_level_keys: keys,
        file_info: FileInfo::from_document(doc),
    };
    report.record(write_json(&output_dir.join("metadata.json"), &metadata), 0);

    println!(
        "\nSplit into {} section files in '{}'",
        sections_created,
        output_dir.display()
    );
    report
}
