/// Tabular results export
///
/// Writes one quoted CSV row per completed trial, matching the column
/// order analysts expect: participant, trial index, condition factors,
/// duration, and the harvested notes.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::trial::TrialRecord;

const HEADERS: [&str; 7] = [
    "Participant",
    "Trial",
    "Context",
    "Technique",
    "DurationMS",
    "NotesCount",
    "NotesContent",
];

/// Quote a field, doubling embedded quotes. Every field is quoted; note
/// content routinely contains commas and free text.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn record_row(record: &TrialRecord) -> String {
    [
        quote(&record.participant),
        quote(&record.trial.to_string()),
        quote(&record.context.to_string()),
        quote(&record.technique.to_string()),
        quote(&record.duration_ms.to_string()),
        quote(&record.notes_count.to_string()),
        quote(&record.notes_content),
    ]
    .join(",")
}

pub fn render_csv(records: &[TrialRecord]) -> Result<String> {
    if records.is_empty() {
        bail!("No trial records to export");
    }

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(HEADERS.join(","));
    lines.extend(records.iter().map(record_row));
    Ok(lines.join("\n"))
}

pub fn write_csv(records: &[TrialRecord], path: &Path) -> Result<()> {
    let csv = render_csv(records)?;
    fs::write(path, csv)
        .with_context(|| format!("Failed to write results to {}", path.display()))?;
    Ok(())
}

/// Conventional export filename for a participant.
pub fn results_filename(participant: &str) -> String {
    format!("{}_results.csv", participant)
}
