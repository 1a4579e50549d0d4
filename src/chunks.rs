use std::fs;
use std::path::Path;

use itertools::Itertools;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::naming;
use crate::output::{write_json, Entries, WriteOutcome};
use crate::report::RunReport;
use crate::settings::Limits;

/// Split an oversized section into `<stem>_detailed/`. Large mappings are
/// grouped into fixed-size chunks, small ones get one file per entry.
/// Anything that is not a mapping is left alone.
pub fn split_large_section(
    stem: &str,
    value: &Value,
    output_dir: &Path,
    limits: &Limits,
    report: &mut RunReport,
) {
    let Some(map) = value.as_object() else {
        debug!(stem, "section is not a mapping, not splitting further");
        return;
    };

    let dir = output_dir.join(format!("{}_detailed", stem));
    if let Err(e) = fs::create_dir_all(&dir) {
        report.record(
            WriteOutcome::Failed {
                path: dir,
                reason: e.to_string(),
            },
            4,
        );
        return;
    }

    if map.len() > limits.max_flat_entries {
        info!(stem, entries = map.len(), "chunking section");
        write_chunks(stem, map, &dir, limits.chunk_size.max(1), report);
    } else {
        info!(stem, entries = map.len(), "splitting section per entry");
        write_entries(map, &dir, limits.entry_name_len, report);
    }
}

fn write_chunks(
    stem: &str,
    map: &Map<String, Value>,
    dir: &Path,
    chunk_size: usize,
    report: &mut RunReport,
) {
    for (i, group) in (&map.iter().chunks(chunk_size)).into_iter().enumerate() {
        let entries: Vec<(&String, &Value)> = group.collect();
        let path = dir.join(naming::chunk_file(stem, i + 1));
        report.record(write_json(&path, &Entries(&entries)), 4);
    }
}

fn write_entries(map: &Map<String, Value>, dir: &Path, name_len: usize, report: &mut RunReport) {
    for (i, (entry_key, entry_value)) in map.iter().enumerate() {
        let path = dir.join(naming::entry_file(entry_key, i + 1, name_len));
        report.record(write_json(&path, &Entries(&[(entry_key, entry_value)])), 4);
    }
}
