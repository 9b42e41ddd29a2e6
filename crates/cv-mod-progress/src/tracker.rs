use std::time::Instant;

use cv_base::config::StepCatalog;
use cv_base::ticker::Ticker;

/// One coherent progress snapshot, recomputed on every tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressState {
    pub step_id: String,
    pub elapsed_ms: u64,
    /// Always within [0, 100]
    pub percent: u8,
    pub eta_ms: u64,
}

impl ProgressState {
    fn idle() -> Self {
        Self { step_id: String::new(), elapsed_ms: 0, percent: 0, eta_ms: 0 }
    }

    /// Display remaining time, floored at zero once elapsed overtakes the
    /// estimate.
    pub fn remaining_ms(&self) -> u64 {
        self.eta_ms.saturating_sub(self.elapsed_ms)
    }
}

/// Derives the progress display for one processing session.
///
/// While active, elapsed time is sampled once per second via the owned
/// ticker. When the session ends (`finish`) the ticker is released and
/// the last computed snapshot is retained for render.
pub struct ProgressTracker {
    catalog: StepCatalog,
    ticker: Ticker,
    started_at: Option<Instant>,
    current_step: String,
    percent_override: Option<u8>,
    eta_override: Option<u64>,
    last: ProgressState,
}

impl ProgressTracker {
    pub fn new(catalog: StepCatalog) -> Self {
        Self {
            catalog,
            ticker: Ticker::one_second(),
            started_at: None,
            current_step: String::new(),
            percent_override: None,
            eta_override: None,
            last: ProgressState::idle(),
        }
    }

    pub fn catalog(&self) -> &StepCatalog {
        &self.catalog
    }

    /// Begin a session: capture the start instant, reset to the first
    /// configured step, and acquire the sampling ticker.
    pub fn begin(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.current_step = self.catalog.first_id().unwrap_or_default().to_string();
        self.percent_override = None;
        self.eta_override = None;
        self.ticker.start(now);
        self.recompute(now);
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    /// Step reported by the engine. Unknown ids are kept verbatim and
    /// resolve to the zero-progress display rather than an error.
    pub fn set_step(&mut self, step_id: &str, now: Instant) {
        self.current_step = step_id.to_string();
        self.recompute(now);
    }

    /// Explicit display overrides from the engine. A percent override is
    /// clamped into [0, 100]; either override wins over derivation.
    pub fn set_overrides(&mut self, percent: Option<u16>, eta_ms: Option<u64>, now: Instant) {
        self.percent_override = percent.map(|p| p.min(100) as u8);
        self.eta_override = eta_ms;
        self.recompute(now);
    }

    /// Fires at most once per second while the session is active.
    /// Returns true when the snapshot was recomputed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.started_at.is_none() {
            return false;
        }
        if !self.ticker.poll(now) {
            return false;
        }
        self.recompute(now);
        true
    }

    /// End the session: release the ticker, keep the last snapshot so the
    /// final values stay on screen.
    pub fn finish(&mut self, now: Instant) {
        if self.started_at.is_some() {
            self.recompute(now);
        }
        self.started_at = None;
        self.ticker.stop();
    }

    pub fn state(&self) -> &ProgressState {
        &self.last
    }

    fn recompute(&mut self, now: Instant) {
        let elapsed_ms = self
            .started_at
            .map(|start| now.saturating_duration_since(start).as_millis() as u64)
            .unwrap_or(self.last.elapsed_ms);

        let percent = match self.percent_override {
            Some(p) => p,
            None => self.catalog.percent_for(&self.current_step),
        };
        let eta_ms = match self.eta_override {
            Some(eta) => eta,
            None => self.catalog.eta_from(&self.current_step),
        };

        self.last = ProgressState { step_id: self.current_step.clone(), elapsed_ms, percent, eta_ms };
    }
}
