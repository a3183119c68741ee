use std::path::Path;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use serde::Serialize;

/// A record whose processing failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedSong {
    pub query: String,
    pub error: String,
}

/// Outcome of every processed record. Each record lands in exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary<T> {
    pub added: Vec<T>,
    pub not_found: Vec<String>,
    pub errors: Vec<FailedSong>,
}

impl<T> Default for RunSummary<T> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            not_found: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl<T> RunSummary<T> {
    pub fn record_added(&mut self, added: T) {
        self.added.push(added);
    }

    pub fn record_not_found(&mut self, query: &str) {
        self.not_found.push(query.to_string());
    }

    pub fn record_error(&mut self, query: &str, error: impl ToString) {
        self.errors.push(FailedSong {
            query: query.to_string(),
            error: error.to_string(),
        });
    }

    pub fn total(&self) -> usize {
        self.added.len() + self.not_found.len() + self.errors.len()
    }

    pub fn tally(&self) -> String {
        format!(
            "Summary:\n  Added: {}\n  Not found: {}\n  Errors: {}\n",
            self.added.len(),
            self.not_found.len(),
            self.errors.len()
        )
    }
}

impl<T: Serialize> RunSummary<T> {
    /// Write the summary as pretty-printed JSON, replacing any previous file.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).wrap_err("Failed to serialize run summary")?;
        std::fs::write(path, json)
            .wrap_err_with(|| format!("Failed to write results file: {}", path.display()))?;
        tracing::info!("Wrote run summary to {}", path.display());
        Ok(())
    }
}

/// What a run controller hands back once it stops.
#[derive(Debug, Clone)]
pub struct RunOutcome<T> {
    pub summary: RunSummary<T>,
    pub processed: usize,
    /// Set when the run stopped early because credentials were rejected.
    pub aborted: bool,
}
