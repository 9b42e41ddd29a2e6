mod app;
mod infra;
mod persistence;
mod ui;

use std::io;
use std::sync::mpsc;

use crossterm::{
    ExecutableCommand,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use cv_base::config::{STORE_DIR, StepCatalog};
use cv_base::state::State;

use app::App;
use infra::engine::EngineEvent;
use persistence::FilePreferenceStore;

fn main() -> io::Result<()> {
    // .env may prefill the credential form
    dotenvy::dotenv().ok();
    infra::logging::init();

    // Panic hook: restore terminal state and log the panic to disk.
    // Without this, a panic leaves the terminal in raw mode + alternate
    // screen, which corrupts the session and the error is lost.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(DisableBracketedPaste);
        let _ = io::stdout().execute(LeaveAlternateScreen);

        let error_dir = std::path::Path::new(STORE_DIR).join("errors");
        let _ = std::fs::create_dir_all(&error_dir);
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let backtrace = std::backtrace::Backtrace::force_capture();
        let msg = format!("[{}] {}\n\n{}\n\n---\n", ts, info, backtrace);
        let log_path = error_dir.join("panic.log");
        let _ = std::fs::OpenOptions::new().create(true).append(true).open(&log_path).and_then(|mut f| {
            use std::io::Write;
            f.write_all(msg.as_bytes())
        });

        default_hook(info);
    }));

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    // Engine events arrive over this channel; the sender is cloned into
    // each spawned session
    let (tx, rx) = mpsc::channel::<EngineEvent>();

    let state = State::new();
    let catalog = StepCatalog::standard();
    let prefs = FilePreferenceStore::open_default();

    let mut app = App::new(state, catalog, prefs);
    let result = app.run(&mut terminal, tx, rx);

    disable_raw_mode()?;
    io::stdout().execute(DisableBracketedPaste)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}
