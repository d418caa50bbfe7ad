//! Result output.
//!
//! Merges every domain's emails, sorts them, and writes the flat output
//! file: one canonical lowercase address per line.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Writes the merged, lexicographically sorted email list to `path`.
///
/// Returns the number of unique addresses written.
pub fn write_output_file(
    path: &Path,
    results: &BTreeMap<String, BTreeSet<String>>,
) -> Result<usize> {
    let all_emails: BTreeSet<&str> = results
        .values()
        .flat_map(|emails| emails.iter().map(String::as_str))
        .collect();

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let mut writer = std::io::BufWriter::new(file);
    for email in &all_emails {
        writeln!(writer, "{email}").context("Failed to write output file")?;
    }
    writer.flush().context("Failed to flush output file")?;

    log::info!(
        "Saved {} unique emails to {}",
        all_emails.len(),
        path.display()
    );
    Ok(all_emails.len())
}
