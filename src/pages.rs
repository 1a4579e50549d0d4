use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::components;
use crate::error::Result;
use crate::loader::load_document;
use crate::naming;
use crate::node::Node;
use crate::output::{ensure_dir, write_json};
use crate::report::RunReport;
use crate::settings::{Limits, PageConfig};

#[derive(Debug, Serialize)]
pub struct PageIndex {
    pub total_pages: usize,
    pub pages: Vec<PageRecord>,
}

#[derive(Debug, Serialize)]
pub struct PageRecord {
    pub index: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub children_count: usize,
    pub filename: String,
}

/// Load `cfg.input` (a mapping with a `children` list) and write one file per
/// page plus `page_index.json`. A missing input creates nothing.
pub fn split_children(cfg: &PageConfig) -> Result<RunReport> {
    println!("Reading {}...", cfg.input.display());
    let data = load_document(&cfg.input)?;
    split_tree(&data, &cfg.output_dir, &cfg.limits)
}

/// Page split of an in-memory tree, e.g. the `document` node of a loaded file.
pub fn split_tree(data: &Value, output_dir: &Path, limits: &Limits) -> Result<RunReport> {
    ensure_dir(output_dir)?;
    Ok(split_pages(data, output_dir, limits))
}

pub fn split_pages(data: &Value, output_dir: &Path, limits: &Limits) -> RunReport {
    let mut report = RunReport::new();
    if !data.is_object() {
        warn!("page input is not a mapping, treating it as having no pages");
    }
    let pages = Node(data).children();
    println!("Found {} top-level items (likely pages)", pages.len());

    let mut records = Vec::with_capacity(pages.len());
    let mut pages_created = 0;
    for (i, page) in pages.iter().enumerate() {
        let index = i + 1;
        let node = Node(page);
        let name = node.name_or(|| format!("Page_{}", index));
        let kind = node.kind();
        let safe = naming::safe_name(&name, limits.page_name_len);
        let filename = naming::page_file(index, &safe, kind);

        if report.record(write_json(&output_dir.join(&filename), page), 0).is_some() {
            println!("  - {}", name);
            pages_created += 1;
            if node.children_count() > limits.page_child_cutoff {
                info!(page = %name, children = node.children_count(), "indexing page components");
                components::index_page(page, index, &safe, output_dir, limits, &mut report);
            }
        }

        records.push(PageRecord {
            index,
            name,
            kind: kind.to_string(),
            id: node.id().to_string(),
            children_count: node.children_count(),
            filename,
        });
    }

    let index = PageIndex {
        total_pages: pages.len(),
        pages: records,
    };
    report.record(write_json(&output_dir.join("page_index.json"), &index), 0);

    println!(
        "\nSplit children into {} page files in '{}'",
        pages_created,
        output_dir.display()
    );
    report
}
