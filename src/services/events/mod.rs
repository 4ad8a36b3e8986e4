// Event store for the demo host
// Reads and writes the read-only event list the grid renders

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::event::CalendarEvent;

/// Load events from a JSON array. A missing file is an empty calendar.
///
/// Entries that fail validation are skipped with a warning so one bad
/// record does not hide the rest.
pub fn load_events(path: &Path) -> Result<Vec<CalendarEvent>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read events from {}", path.display()))?;
    let events: Vec<CalendarEvent> = serde_json::from_str(&data)
        .with_context(|| format!("failed to deserialize events from {}", path.display()))?;

    Ok(events
        .into_iter()
        .filter(|event| match event.validate() {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Skipping event {}: {}", event.id, err);
                false
            }
        })
        .collect())
}

pub fn save_events(path: &Path, events: &[CalendarEvent]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = serde_json::to_string_pretty(events)?;
    fs::write(path, data)
        .with_context(|| format!("failed to write events to {}", path.display()))?;
    Ok(())
}
