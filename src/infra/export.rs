//! Fire-and-forget side effects: result serialization, file export, and
//! clipboard writes. Failures here are reported as notices and log lines;
//! they never touch derived state.

use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;

/// Serialize to formatted JSON. On failure the output is a diagnostic
/// placeholder so the raw-data view and export keep working.
pub fn to_pretty_json<T: Serialize>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(err) => {
            log::warn!("result serialization failed: {err}");
            format!("<unserializable result: {err}>")
        }
    }
}

/// Write the serialized result into `dir` under a timestamped name.
pub fn export_json_in(dir: &Path, value: &impl Serialize) -> Result<PathBuf, String> {
    let name = format!("case-result-{}.json", Local::now().format("%Y%m%d-%H%M%S"));
    let path = dir.join(name);
    std::fs::write(&path, to_pretty_json(value)).map_err(|err| err.to_string())?;
    Ok(path)
}

/// Export into the working directory.
pub fn export_json(value: &impl Serialize) -> Result<PathBuf, String> {
    export_json_in(Path::new("."), value)
}

/// Put `text` on the system clipboard. The caller decides how to surface
/// a failure; nothing here blocks or retries.
pub fn copy_text(text: &str) -> Result<(), String> {
    let mut clipboard = arboard::Clipboard::new().map_err(|err| err.to_string())?;
    clipboard.set_text(text.to_string()).map_err(|err| err.to_string())
}
