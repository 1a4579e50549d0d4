use tracing::debug;

use crate::output::WriteOutcome;

/// Collects every write attempted during a run, in order.
#[derive(Debug, Default)]
pub struct RunReport {
    outcomes: Vec<WriteOutcome>,
}

impl RunReport {
    pub fn new() -> Self {
        RunReport::default()
    }

    /// Print a progress line for `outcome` and keep it. Returns the written
    /// size, `None` when the write failed.
    pub fn record(&mut self, outcome: WriteOutcome, indent: usize) -> Option<u64> {
        let pad = " ".repeat(indent);
        match &outcome {
            WriteOutcome::Written { path, bytes } => {
                println!("{}Created {} ({})", pad, path.display(), human_size(*bytes));
            }
            WriteOutcome::Failed { path, reason } => {
                println!("{}Error writing {}: {}", pad, path.display(), reason);
                debug!(path = %path.display(), %reason, "write failed");
            }
        }
        let bytes = outcome.bytes();
        self.outcomes.push(outcome);
        bytes
    }

    pub fn outcomes(&self) -> &[WriteOutcome] {
        &self.outcomes
    }

    pub fn written(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_written()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &WriteOutcome> {
        self.outcomes().iter().filter(|o| !o.is_written())
    }

    pub fn total_bytes(&self) -> u64 {
        self.outcomes.iter().filter_map(WriteOutcome::bytes).sum()
    }

    pub fn print_summary(&self) {
        let failed: Vec<_> = self.failed().collect();
        println!(
            "Wrote {} files ({}), {} failed.",
            self.written(),
            human_size(self.total_bytes()),
            failed.len()
        );
        for f in failed {
            println!("  failed: {}", f.path().display());
        }
    }
}

pub fn human_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{} B", bytes)
    } else if b < KIB * KIB {
        format!("{:.1} KB", b / KIB)
    } else {
        format!("{:.2} MB", b / KIB / KIB)
    }
}
