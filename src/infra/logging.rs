//! File logging initialization.
//!
//! The TUI owns the terminal, so the only log destination is a file in
//! the app's dot-directory. Initialization failures degrade to no
//! logging; they never stop startup.

use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{Config, ConfigBuilder, WriteLogger};

use cv_base::config::{LOG_FILE, STORE_DIR};

pub fn init() {
    let dir = PathBuf::from(STORE_DIR);
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let path = dir.join(LOG_FILE);
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(LevelFilter::Info, build_config(), file);
        }
        Err(err) => {
            eprintln!("Warning: could not create log file at {path:?}: {err}");
        }
    }
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}
