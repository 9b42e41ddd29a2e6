use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Severity of a realtime update, used only for display styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateLevel {
    Info,
    Warning,
    Error,
    Success,
}

impl UpdateLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Success => "success",
        }
    }
}

/// One engine event. Never mutated after creation; ordering within the
/// log is arrival order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeUpdate {
    /// Unique within one processing session
    pub id: String,
    /// RFC 3339 wall-clock instant, kept verbatim as received
    pub timestamp: String,
    pub step: String,
    pub message: String,
    pub level: UpdateLevel,
}

/// Format an update timestamp as local `HH:MM:SS`. A timestamp that does
/// not parse is passed through unchanged.
pub fn format_timestamp(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(instant) => instant.with_timezone(&Local).format("%H:%M:%S").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_valid_timestamps_as_clock_time() {
        let formatted = format_timestamp("2026-08-06T09:15:42+00:00");
        assert_eq!(formatted.len(), 8);
        assert_eq!(formatted.matches(':').count(), 2);
    }

    #[test]
    fn malformed_timestamp_passes_through() {
        assert_eq!(format_timestamp("just now"), "just now");
        assert_eq!(format_timestamp(""), "");
    }
}
