use crate::types::RealtimeUpdate;

/// Append-only event history owned by one processing session.
///
/// The storage layer never truncates; display layers bound what they
/// render via `recent`. A new session starts from a fresh log.
#[derive(Debug, Default)]
pub struct UpdateLog {
    entries: Vec<RealtimeUpdate>,
}

impl UpdateLog {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn append(&mut self, update: RealtimeUpdate) {
        self.entries.push(update);
    }

    /// The last-appended update, if any.
    pub fn latest(&self) -> Option<&RealtimeUpdate> {
        self.entries.last()
    }

    /// The last `n` updates, most recent first.
    pub fn recent(&self, n: usize) -> Vec<&RealtimeUpdate> {
        self.entries.iter().rev().take(n).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Full history in arrival order.
    pub fn entries(&self) -> &[RealtimeUpdate] {
        &self.entries
    }
}
