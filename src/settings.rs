//! Split thresholds and default locations.
//!
//! The thresholds are fixed; they are passed around as values so tests can
//! run against small limits and temporary directories.

use std::path::{Path, PathBuf};

pub const DEFAULT_DOCUMENT: &str = "figma-file.json";
pub const DEFAULT_SECTIONS_DIR: &str = "figma_split";
pub const DEFAULT_PAGES_DIR: &str = "figma_pages";

/// Where the section split leaves the document's page list.
pub fn children_path(sections_dir: &Path) -> PathBuf {
    sections_dir.join("document_detailed").join("children.json")
}

pub fn default_children_path() -> PathBuf {
    children_path(&PathBuf::from(DEFAULT_SECTIONS_DIR))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Limits {
    /// Section files larger than this are split further.
    pub large_section_bytes: u64,
    /// Entries per chunk file.
    pub chunk_size: usize,
    /// Mappings with more entries than this are chunked, otherwise split per entry.
    pub max_flat_entries: usize,
    /// Pages with more children than this get a component index.
    pub page_child_cutoff: usize,
    /// Components with more children than this get their own file.
    pub component_child_cutoff: usize,
    pub page_name_len: usize,
    pub component_name_len: usize,
    /// Cap for file names of entries split out of an oversized section.
    pub entry_name_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            large_section_bytes: 5 * 1024 * 1024,
            chunk_size: 50,
            max_flat_entries: 100,
            page_child_cutoff: 10,
            component_child_cutoff: 5,
            page_name_len: 50,
            component_name_len: 30,
            entry_name_len: 50,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SectionConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub limits: Limits,
}

impl Default for SectionConfig {
    fn default() -> Self {
        SectionConfig {
            input: PathBuf::from(DEFAULT_DOCUMENT),
            output_dir: PathBuf::from(DEFAULT_SECTIONS_DIR),
            limits: Limits::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub limits: Limits,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            input: default_children_path(),
            output_dir: PathBuf::from(DEFAULT_PAGES_DIR),
            limits: Limits::default(),
        }
    }
}
