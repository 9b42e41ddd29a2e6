//! Semantic actions produced by event handling and applied by the app.

use cv_mod_tabs::TabMove;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    /// Repaint on the next loop pass (terminal resize)
    Redraw,
    // Credential form
    FormInput(char),
    FormBackspace,
    FormFocusNext,
    FormFocusPrev,
    FormPaste(String),
    Submit,
    // Processing
    CancelProcessing,
    // Result inspector
    Tab(TabMove),
    CopyToken,
    CopyResultJson,
    ExportResult,
    NewLookup,
}
