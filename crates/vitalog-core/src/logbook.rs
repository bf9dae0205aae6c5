use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use tracing::{debug, info};

use crate::entry::Entry;

/// Reads the activity log the entry forms maintain: JSONL, one record
/// per line, blank lines skipped. This subsystem never writes the file;
/// records flow in wholesale and are projected read-only.
#[tracing::instrument(skip(path))]
pub fn load_entries(path: &Path) -> anyhow::Result<Vec<Entry>> {
    debug!(file = %path.display(), "loading entries");
    let file = fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut out = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let entry: Entry = serde_json::from_str(trimmed)
            .with_context(|| format!("failed parsing {} line {}", path.display(), idx + 1))?;
        out.push(entry);
    }

    info!(file = %path.display(), count = out.len(), "loaded entries");
    Ok(out)
}
