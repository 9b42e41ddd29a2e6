//! Runtime state shared between the event loop and the renderers.

use crate::state::FormState;
use crate::types::CaseResult;

/// Which screen owns the main content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Collecting credentials
    Credentials,
    /// A processing session is active
    Processing,
    /// A result arrived and the inspector is showing it
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Non-fatal, single-line message shown in the status bar. Side-effect
/// failures (clipboard, engine errors) land here instead of interrupting
/// the session.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), level: NoticeLevel::Info }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), level: NoticeLevel::Error }
    }
}

pub struct State {
    pub phase: Phase,
    pub form: FormState,
    /// Latest result payload; owned here so renderers and the tab
    /// resolver observe the same reference
    pub result: Option<CaseResult>,
    pub notice: Option<Notice>,
    /// Whether the UI needs to be redrawn
    pub dirty: bool,
}

impl State {
    pub fn new() -> Self {
        Self {
            phase: Phase::Credentials,
            form: FormState::from_env(),
            result: None,
            notice: None,
            dirty: true,
        }
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.dirty = true;
    }

    pub fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.dirty = true;
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
