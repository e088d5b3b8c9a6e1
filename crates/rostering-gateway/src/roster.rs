//! Roster workbook loading.

use std::path::Path;

use tracing::{info, warn};

use rostering_core::RosterContext;

/// Load the roster workbook once at startup.
///
/// A missing or unreadable workbook yields an empty context; the gateway
/// keeps working without roster data in its prompt.
pub fn load_roster_context(path: &Path) -> RosterContext {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Roster workbook not readable, using empty context");
            return RosterContext::empty();
        }
    };

    match RosterContext::from_json_str(&contents) {
        Ok(roster) => {
            info!(
                path = %path.display(),
                sheets = roster.sheet_count(),
                rows = roster.row_count(),
                "Roster workbook loaded"
            );
            roster
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Roster workbook malformed, using empty context");
            RosterContext::empty()
        }
    }
}
