//! Server journal projection.

use wayfarer_protocol::GameEvent;
use wayfarer_protocol::types::LogEntry;

use crate::{ApplyCtx, Projection};

/// Append-only log of the server's human-readable lines ("Welcome!",
/// "Your expedition ended due to lack of energy.").
#[derive(Debug, Default)]
pub struct JournalProjection {
    entries: Vec<LogEntry>,
}

impl JournalProjection {
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }
}

impl Projection for JournalProjection {
    fn apply(&mut self, event: &GameEvent, _ctx: &ApplyCtx) {
        if let GameEvent::Log(entry) = event {
            self.entries.push(entry.clone());
        }
    }
}
