//! Event stream ingestion: JSON Lines in, a driven collector out.

use crate::error::{CliError, CliResult};
use informe::{LifecycleEvent, RunCollector};
use std::io::BufRead;

/// Feed every event from a JSON-Lines reader into a fresh collector
///
/// Blank lines are skipped; a line that is not a valid lifecycle event is
/// a hard error carrying its line number. Protocol violations surface as
/// they happen, before later events are read.
pub fn collect_events<R: BufRead>(reader: R) -> CliResult<RunCollector> {
    let mut collector = RunCollector::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let event: LifecycleEvent = serde_json::from_str(trimmed)
            .map_err(|e| CliError::event_stream(format!("line {}: {e}", index + 1)))?;
        tracing::debug!(line = index + 1, ?event, "applying lifecycle event");
        collector.apply(event)?;
    }
    if !collector.is_done() {
        tracing::warn!("event stream ended before runDone; the report is partial");
    }
    Ok(collector)
}
