use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event;
use ratatui::prelude::*;
use secrecy::{ExposeSecret, SecretString};

use cv_base::config::{EVENT_POLL_MS, RENDER_THROTTLE_MS, STEP_COMPLETE, StepCatalog};
use cv_base::state::{Notice, Phase, State};
use cv_base::types::CaseResult;
use cv_mod_progress::ProgressTracker;
use cv_mod_tabs::{TabMove, TabResolver};
use cv_mod_token::TokenClock;
use cv_mod_updates::UpdateLog;

use crate::app::actions::Action;
use crate::app::events::handle_event;
use crate::infra::engine::{self, EngineEvent, EngineHandle, ProcessingRequest};
use crate::infra::export;
use crate::persistence::FilePreferenceStore;
use crate::ui;

/// One processing session: the engine handle plus the state it feeds.
/// The elapsed-time sampler lives in the tracker; the update log is
/// replaced wholesale when the next session starts.
pub struct Session {
    pub tracker: ProgressTracker,
    pub log: UpdateLog,
    engine: EngineHandle,
}

/// Result-display state: tab selection plus the token countdown.
/// Created when a result arrives, torn down when the user leaves the
/// result screen; teardown releases the countdown ticker.
pub struct Inspector {
    pub tabs: TabResolver,
    pub token_clock: Option<TokenClock>,
}

impl Inspector {
    fn new(result: &CaseResult, prefs: &FilePreferenceStore) -> Self {
        Self {
            tabs: TabResolver::restore(result, prefs),
            token_clock: start_token_clock(result),
        }
    }

    fn teardown(mut self) {
        if let Some(clock) = &mut self.token_clock {
            clock.stop();
        }
    }
}

/// Countdown acquired only when the result actually carries a token.
fn start_token_clock(result: &CaseResult) -> Option<TokenClock> {
    result
        .oauth_token
        .as_ref()
        .map(|token| TokenClock::start(&token.expires_at, Instant::now(), Utc::now()))
}

pub struct App {
    pub state: State,
    catalog: StepCatalog,
    prefs: FilePreferenceStore,
    session: Option<Session>,
    inspector: Option<Inspector>,
    last_render: Option<Instant>,
}

impl App {
    pub fn new(state: State, catalog: StepCatalog, prefs: FilePreferenceStore) -> Self {
        Self { state, catalog, prefs, session: None, inspector: None, last_render: None }
    }

    pub fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tx: Sender<EngineEvent>,
        rx: Receiver<EngineEvent>,
    ) -> io::Result<()> {
        loop {
            // Input first, with a short blocking poll so the loop idles
            // instead of spinning
            if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
                let evt = event::read()?;
                let Some(action) = handle_event(&evt, &self.state) else {
                    // User quit — signal the engine and leave
                    if let Some(session) = &self.session {
                        session.engine.cancel();
                    }
                    break;
                };
                self.handle_action(action, &tx);
            }

            self.drain_engine_events(&rx);
            self.poll_tickers();

            let now = Instant::now();
            let due = self
                .last_render
                .is_none_or(|last| now.duration_since(last) >= Duration::from_millis(RENDER_THROTTLE_MS));
            if self.state.dirty && due {
                terminal.draw(|frame| {
                    ui::render(frame, &self.state, self.session.as_ref(), self.inspector.as_ref())
                })?;
                self.state.dirty = false;
                self.last_render = Some(now);
            }
        }
        Ok(())
    }

    fn handle_action(&mut self, action: Action, tx: &Sender<EngineEvent>) {
        match action {
            Action::None => {}
            Action::Redraw => {
                self.state.dirty = true;
            }
            Action::FormInput(c) => {
                self.state.form.type_char(c);
                self.state.dirty = true;
            }
            Action::FormBackspace => {
                self.state.form.backspace();
                self.state.dirty = true;
            }
            Action::FormFocusNext => {
                self.state.form.focus_next();
                self.state.dirty = true;
            }
            Action::FormFocusPrev => {
                self.state.form.focus_prev();
                self.state.dirty = true;
            }
            Action::FormPaste(text) => {
                self.state.form.paste(&text);
                self.state.dirty = true;
            }
            Action::Submit => self.submit(tx),
            Action::CancelProcessing => self.cancel_processing(),
            Action::Tab(mv) => self.move_tab(mv),
            Action::CopyToken => self.copy_token(),
            Action::CopyResultJson => self.copy_result_json(),
            Action::ExportResult => self.export_result(),
            Action::NewLookup => self.new_lookup(),
        }
    }

    // === Session lifecycle ===

    fn submit(&mut self, tx: &Sender<EngineEvent>) {
        if !self.state.form.is_complete() {
            self.state.set_notice(Notice::error("All three fields are required"));
            return;
        }
        let request = ProcessingRequest {
            environment: self.state.form.environment.trim().to_string(),
            client_id: self.state.form.client_id.trim().to_string(),
            client_secret: SecretString::from(self.state.form.client_secret.clone()),
        };
        log::info!(
            "starting lookup for client {} against {}",
            request.client_id,
            request.environment
        );

        let engine = engine::spawn(request, self.catalog.clone(), tx.clone());
        let mut tracker = ProgressTracker::new(self.catalog.clone());
        tracker.begin(Instant::now());

        // Fresh session: new log, previous inspector torn down
        self.session = Some(Session { tracker, log: UpdateLog::new(), engine });
        if let Some(inspector) = self.inspector.take() {
            inspector.teardown();
        }
        self.state.result = None;
        self.state.phase = Phase::Processing;
        self.state.clear_notice();
        self.state.dirty = true;
    }

    fn cancel_processing(&mut self) {
        let now = Instant::now();
        if let Some(session) = &mut self.session {
            session.engine.cancel();
            session.tracker.finish(now);
        }
        self.state.phase = Phase::Credentials;
        self.state.set_notice(Notice::info("Processing cancelled"));
        log::info!("processing cancelled by user");
    }

    fn new_lookup(&mut self) {
        if let Some(inspector) = self.inspector.take() {
            inspector.teardown();
        }
        self.state.result = None;
        self.state.phase = Phase::Credentials;
        self.state.dirty = true;
    }

    // === Engine events ===

    fn drain_engine_events(&mut self, rx: &Receiver<EngineEvent>) {
        while let Ok(event) = rx.try_recv() {
            match event {
                EngineEvent::Initialized => {
                    log::info!("engine ready");
                }
                EngineEvent::Update(update) => {
                    // A cancel can race a final emission; a finished
                    // session stays as recorded
                    if self.state.phase == Phase::Processing
                        && let Some(session) = &mut self.session
                    {
                        session.tracker.set_step(&update.step, Instant::now());
                        session.log.append(update);
                        self.state.dirty = true;
                    }
                }
                EngineEvent::Result(result) => self.show_result(*result),
                EngineEvent::Error { message, context } => {
                    log::error!("engine error in {context}: {message}");
                    if self.state.phase != Phase::Processing {
                        continue;
                    }
                    let now = Instant::now();
                    if let Some(session) = &mut self.session {
                        session.tracker.finish(now);
                    }
                    self.state.phase = Phase::Credentials;
                    self.state.set_notice(Notice::error(format!("{context}: {message}")));
                }
            }
        }
    }

    fn show_result(&mut self, result: CaseResult) {
        if self.state.phase != Phase::Processing {
            // A cancel can race the final emission; the session is over
            log::warn!("result arrived after the session ended; ignored");
            return;
        }
        let now = Instant::now();
        if let Some(session) = &mut self.session {
            session.tracker.set_step(STEP_COMPLETE, now);
            session.tracker.finish(now);
        }

        // Fresh display restores the persisted tab; a replaced result
        // reconciles the existing selection against the new payload
        match &mut self.inspector {
            Some(inspector) => {
                inspector.tabs.reconcile(&result, &mut self.prefs);
                if let Some(clock) = &mut inspector.token_clock {
                    clock.stop();
                }
                inspector.token_clock = start_token_clock(&result);
            }
            None => {
                self.inspector = Some(Inspector::new(&result, &self.prefs));
            }
        }

        self.state.result = Some(result);
        self.state.phase = Phase::Result;
        self.state.dirty = true;
    }

    // === Timers ===

    fn poll_tickers(&mut self) {
        let now = Instant::now();
        if let Some(session) = &mut self.session
            && session.tracker.poll(now)
        {
            self.state.dirty = true;
        }
        if let Some(inspector) = &mut self.inspector
            && let Some(clock) = &mut inspector.token_clock
            && clock.poll(now, Utc::now())
        {
            self.state.dirty = true;
        }
    }

    // === Result inspector ===

    fn move_tab(&mut self, mv: TabMove) {
        if let (Some(inspector), Some(result)) = (self.inspector.as_mut(), self.state.result.as_ref())
            && inspector.tabs.apply_move(mv, result, &mut self.prefs).is_some()
        {
            self.state.dirty = true;
        }
    }

    fn copy_token(&mut self) {
        let Some(token) = self.state.result.as_ref().and_then(|r| r.oauth_token.as_ref()) else {
            self.state.set_notice(Notice::info("No token in this result"));
            return;
        };
        match export::copy_text(token.access_token.expose_secret()) {
            Ok(()) => self.state.set_notice(Notice::info("Access token copied to clipboard")),
            Err(err) => {
                log::warn!("clipboard copy failed: {err}");
                self.state.set_notice(Notice::error("Clipboard unavailable"));
            }
        }
    }

    fn copy_result_json(&mut self) {
        let Some(result) = self.state.result.as_ref() else {
            return;
        };
        match export::copy_text(&export::to_pretty_json(result)) {
            Ok(()) => self.state.set_notice(Notice::info("Result JSON copied to clipboard")),
            Err(err) => {
                log::warn!("clipboard copy failed: {err}");
                self.state.set_notice(Notice::error("Clipboard unavailable"));
            }
        }
    }

    fn export_result(&mut self) {
        let Some(result) = self.state.result.as_ref() else {
            return;
        };
        match export::export_json(result) {
            Ok(path) => {
                log::info!("result exported to {path:?}");
                self.state.set_notice(Notice::info(format!("Saved {}", path.display())));
            }
            Err(err) => {
                log::warn!("result export failed: {err}");
                self.state.set_notice(Notice::error(format!("Export failed: {err}")));
            }
        }
    }
}
