//! Append-only event history for a processing session.

mod log;
mod types;

pub use log::UpdateLog;
pub use types::{RealtimeUpdate, UpdateLevel, format_timestamp};
