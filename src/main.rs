mod chunks;
mod components;
mod error;
mod loader;
mod naming;
mod node;
mod output;
mod pages;
mod report;
mod sections;
mod settings;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;

use crate::error::{LoadError, SplitError};
use crate::report::RunReport;
use crate::settings::{Limits, PageConfig, SectionConfig};

#[derive(Parser)]
#[command(name = "figma_split", about = "Split a large Figma JSON export into smaller files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one file per top-level key of the document
    Sections {
        /// Exported Figma document
        #[arg(short, long, default_value = settings::DEFAULT_DOCUMENT)]
        input: PathBuf,
        #[arg(short, long, default_value = settings::DEFAULT_SECTIONS_DIR)]
        output: PathBuf,
    },
    /// Write one file per page of a split document's children
    Pages {
        /// children.json produced by `sections`
        #[arg(short, long, default_value_os_t = settings::default_children_path())]
        input: PathBuf,
        #[arg(short, long, default_value = settings::DEFAULT_PAGES_DIR)]
        output: PathBuf,
    },
    /// Sections, then pages from the document's `document` node
    Run {
        #[arg(short, long, default_value = settings::DEFAULT_DOCUMENT)]
        input: PathBuf,
        #[arg(long, default_value = settings::DEFAULT_SECTIONS_DIR)]
        sections_dir: PathBuf,
        #[arg(long, default_value = settings::DEFAULT_PAGES_DIR)]
        pages_dir: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let limits = Limits::default();
    info!(?limits, "starting split");

    let ok = match cli.command {
        Commands::Sections { input, output } => run_sections(&SectionConfig {
            input,
            output_dir: output,
            limits,
        }),
        Commands::Pages { input, output } => run_pages(&PageConfig {
            input,
            output_dir: output,
            limits,
        }),
        Commands::Run {
            input,
            sections_dir,
            pages_dir,
        } => run_all(
            &SectionConfig {
                input,
                output_dir: sections_dir,
                limits,
            },
            &pages_dir,
        ),
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run_sections(cfg: &SectionConfig) -> bool {
    println!("Figma JSON Splitter");
    println!("===================\n");

    sections_done(cfg, sections::split_document(cfg))
}

fn sections_done(cfg: &SectionConfig, result: error::Result<RunReport>) -> bool {
    match result {
        Ok(report) => {
            finish(&report);
            println!("\nSplit completed. Start with:");
            for file in ["document", "components", "componentSets", "styles"] {
                println!("  - {}", cfg.output_dir.join(naming::section_file(file)).display());
            }
            println!("  - {}", cfg.output_dir.join("metadata.json").display());
            true
        }
        Err(e) => {
            println!("Error: {}", e);
            println!("\nSplit failed. Please check the error messages above.");
            false
        }
    }
}

fn run_pages(cfg: &PageConfig) -> bool {
    println!("Figma Children Splitter");
    println!("=======================\n");

    pages_done(&cfg.output_dir, pages::split_children(cfg))
}

fn pages_done(output_dir: &Path, result: error::Result<RunReport>) -> bool {
    match result {
        Ok(report) => {
            finish(&report);
            println!("\nChildren split completed. Browse:");
            println!("  - {} (overview of all pages)", output_dir.join("page_index.json").display());
            println!("  - {} (individual pages)", output_dir.join("01_*.json").display());
            println!("  - {} (component breakdowns)", output_dir.join("page_*_index/").display());
            true
        }
        Err(e) => {
            println!("Error: {}", e);
            if matches!(e, SplitError::Load(LoadError::NotFound { .. })) {
                println!("Run `figma_split sections` first to create the base split files.");
            }
            println!("\nChildren split failed. Please check the error messages above.");
            false
        }
    }
}

/// Load the document once, split its sections, then split the pages of its
/// `document` node. Works whether or not `document` was large enough to be
/// split into `document_detailed/`.
fn run_all(cfg: &SectionConfig, pages_dir: &Path) -> bool {
    println!("Figma JSON Splitter");
    println!("===================\n");
    println!("Reading {}...", cfg.input.display());
    let doc = match loader::load_document(&cfg.input) {
        Ok(doc) => doc,
        Err(e) => return sections_done(cfg, Err(e.into())),
    };
    if !sections_done(cfg, sections::split_loaded(&doc, cfg)) {
        return false;
    }

    println!("\nFigma Children Splitter");
    println!("=======================\n");
    let tree = doc.get("document").unwrap_or(&Value::Null);
    pages_done(pages_dir, pages::split_tree(tree, pages_dir, &cfg.limits))
}

fn finish(report: &RunReport) {
    println!();
    report.print_summary();
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
