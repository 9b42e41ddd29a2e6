//! Active-tab selection: restore, reconcile, and keyboard movement.
//!
//! Invariant: the active tab is always a member of the available set for
//! the current result. Restoration and reconciliation both funnel through
//! the same fallback (first available, else the configuration sentinel),
//! so a stale persisted preference is silently corrected rather than
//! surfaced as an error.

use crossterm::event::{KeyCode, KeyEvent};

use cv_base::types::CaseResult;

use crate::store::{ACTIVE_TAB_KEY, PreferenceStore};
use crate::tabs::{ResultTab, available_tabs};

/// Keyboard navigation over the available tab list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabMove {
    /// ArrowRight: next tab, wrapping past the end
    Next,
    /// ArrowLeft: previous tab, wrapping past the start
    Prev,
    /// Home
    First,
    /// End
    Last,
    /// Enter or Space: re-activate in place
    Activate,
}

impl TabMove {
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Right => Some(Self::Next),
            KeyCode::Left => Some(Self::Prev),
            KeyCode::Home => Some(Self::First),
            KeyCode::End => Some(Self::Last),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Self::Activate),
            _ => None,
        }
    }
}

pub struct TabResolver {
    active: ResultTab,
}

impl TabResolver {
    /// Initial selection for a fresh result display. The persisted
    /// preference is read once here; it wins only if it names a tab the
    /// result actually supports.
    pub fn restore(result: &CaseResult, store: &dyn PreferenceStore) -> Self {
        let available = available_tabs(result);
        let preferred = store
            .get(ACTIVE_TAB_KEY)
            .and_then(|id| ResultTab::from_id(&id))
            .filter(|tab| available.contains(tab));
        let active = preferred.or_else(|| available.first().copied()).unwrap_or(ResultTab::Configuration);
        Self { active }
    }

    pub fn active(&self) -> ResultTab {
        self.active
    }

    /// Re-check the active tab after the result payload changed. Called
    /// on result identity change only, not on every render, so the
    /// selection cannot oscillate. Returns true when the active tab was
    /// reset (and persisted).
    pub fn reconcile(&mut self, result: &CaseResult, store: &mut dyn PreferenceStore) -> bool {
        let available = available_tabs(result);
        if available.contains(&self.active) {
            return false;
        }
        self.active = available.first().copied().unwrap_or(ResultTab::Configuration);
        store.set(ACTIVE_TAB_KEY, self.active.id());
        true
    }

    /// Direct activation. Only available tabs can become active; the
    /// change is written through synchronously.
    pub fn activate(
        &mut self,
        tab: ResultTab,
        result: &CaseResult,
        store: &mut dyn PreferenceStore,
    ) -> bool {
        if !tab.is_available(result) {
            return false;
        }
        let changed = self.active != tab;
        self.active = tab;
        store.set(ACTIVE_TAB_KEY, tab.id());
        changed
    }

    /// Apply a keyboard move. Returns the newly selected tab when the key
    /// was consumed; the caller transfers focus to that tab's control.
    pub fn apply_move(
        &mut self,
        mv: TabMove,
        result: &CaseResult,
        store: &mut dyn PreferenceStore,
    ) -> Option<ResultTab> {
        let available = available_tabs(result);
        if available.is_empty() {
            return None;
        }
        // The invariant guarantees membership; position 0 is the safe
        // recovery if the caller skipped reconciliation.
        let pos = available.iter().position(|t| *t == self.active).unwrap_or(0);
        let target = match mv {
            TabMove::Next => available[(pos + 1) % available.len()],
            TabMove::Prev => available[(pos + available.len() - 1) % available.len()],
            TabMove::First => available[0],
            TabMove::Last => available[available.len() - 1],
            TabMove::Activate => available[pos],
        };
        self.activate(target, result, store);
        Some(target)
    }

    /// Convenience wrapper: map a key event and apply it in one call.
    pub fn handle_key(
        &mut self,
        key: &KeyEvent,
        result: &CaseResult,
        store: &mut dyn PreferenceStore,
    ) -> Option<ResultTab> {
        TabMove::from_key(key).and_then(|mv| self.apply_move(mv, result, store))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use cv_base::types::{CaseDetails, CaseResult, EnvironmentConfig, OAuthToken};
    use secrecy::SecretString;

    pub fn bare_result() -> CaseResult {
        CaseResult {
            base_url: "https://api.sandbox.example.com".to_string(),
            auth_mode: "client-credentials".to_string(),
            token_hint: "none".to_string(),
            config: EnvironmentConfig {
                environment: "sandbox".to_string(),
                api_version: "v2".to_string(),
                timeout_ms: 30_000,
                retry_limit: 3,
            },
            case_details: None,
            oauth_token: None,
            processing_metadata: None,
        }
    }

    pub fn full_result() -> CaseResult {
        let mut result = bare_result();
        result.case_details = Some(CaseDetails {
            case_id: "CASE-1042".to_string(),
            status: "open".to_string(),
            summary: "Billing dispute".to_string(),
            opened_at: "2026-07-30T08:00:00+00:00".to_string(),
            assignee: None,
        });
        result.oauth_token = Some(OAuthToken {
            access_token: SecretString::from("tok-0123456789abcdef"),
            token_type: "Bearer".to_string(),
            expires_at: "2026-08-06T13:00:00+00:00".to_string(),
            expires_in: 3_600,
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{bare_result, full_result};
    use super::*;
    use crate::store::MemoryStore;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    // ── restore ────────────────────────────────────────────────────

    #[test]
    fn no_preference_selects_first_available() {
        let store = MemoryStore::new();
        let resolver = TabResolver::restore(&bare_result(), &store);
        assert_eq!(resolver.active(), ResultTab::Configuration);

        let resolver = TabResolver::restore(&full_result(), &store);
        assert_eq!(resolver.active(), ResultTab::CaseDetails);
    }

    #[test]
    fn valid_preference_wins() {
        let mut store = MemoryStore::new();
        store.set(ACTIVE_TAB_KEY, "raw-data");
        let resolver = TabResolver::restore(&full_result(), &store);
        assert_eq!(resolver.active(), ResultTab::RawData);
    }

    #[test]
    fn stale_preference_falls_back_to_first_available() {
        let mut store = MemoryStore::new();
        store.set(ACTIVE_TAB_KEY, "token-status");
        // Result has no token, so the preference no longer applies
        let resolver = TabResolver::restore(&bare_result(), &store);
        assert_eq!(resolver.active(), ResultTab::Configuration);
    }

    #[test]
    fn garbage_preference_is_ignored() {
        let mut store = MemoryStore::new();
        store.set(ACTIVE_TAB_KEY, "not-a-tab");
        let resolver = TabResolver::restore(&full_result(), &store);
        assert_eq!(resolver.active(), ResultTab::CaseDetails);
    }

    // ── reconcile ──────────────────────────────────────────────────

    #[test]
    fn reconcile_resets_when_active_tab_loses_its_data() {
        let mut store = MemoryStore::new();
        let mut resolver = TabResolver::restore(&full_result(), &store);
        resolver.activate(ResultTab::TokenStatus, &full_result(), &mut store);

        // New result without a token: token-status is no longer valid
        let changed = resolver.reconcile(&bare_result(), &mut store);
        assert!(changed);
        assert_eq!(resolver.active(), ResultTab::Configuration);
        assert_eq!(store.get(ACTIVE_TAB_KEY).as_deref(), Some("configuration"));
    }

    #[test]
    fn reconcile_is_a_noop_when_active_tab_still_applies() {
        let mut store = MemoryStore::new();
        let mut resolver = TabResolver::restore(&full_result(), &store);
        resolver.activate(ResultTab::RawData, &full_result(), &mut store);
        assert!(!resolver.reconcile(&bare_result(), &mut store));
        assert_eq!(resolver.active(), ResultTab::RawData);
    }

    // ── activate ───────────────────────────────────────────────────

    #[test]
    fn activate_persists_synchronously() {
        let mut store = MemoryStore::new();
        let mut resolver = TabResolver::restore(&full_result(), &store);
        assert!(resolver.activate(ResultTab::Configuration, &full_result(), &mut store));
        assert_eq!(store.get(ACTIVE_TAB_KEY).as_deref(), Some("configuration"));
    }

    #[test]
    fn activate_refuses_unavailable_tabs() {
        let mut store = MemoryStore::new();
        let mut resolver = TabResolver::restore(&bare_result(), &store);
        assert!(!resolver.activate(ResultTab::TokenStatus, &bare_result(), &mut store));
        assert_eq!(resolver.active(), ResultTab::Configuration);
        assert!(store.get(ACTIVE_TAB_KEY).is_none());
    }

    // ── keyboard ───────────────────────────────────────────────────

    #[test]
    fn arrow_left_from_first_wraps_to_last() {
        let mut store = MemoryStore::new();
        let result = full_result();
        let mut resolver = TabResolver::restore(&result, &store);
        assert_eq!(resolver.active(), ResultTab::CaseDetails);

        let moved = resolver.handle_key(&key(KeyCode::Left), &result, &mut store);
        assert_eq!(moved, Some(ResultTab::RawData));
        assert_eq!(resolver.active(), ResultTab::RawData);
    }

    #[test]
    fn arrow_right_from_last_wraps_to_first() {
        let mut store = MemoryStore::new();
        let result = full_result();
        let mut resolver = TabResolver::restore(&result, &store);
        resolver.activate(ResultTab::RawData, &result, &mut store);

        let moved = resolver.handle_key(&key(KeyCode::Right), &result, &mut store);
        assert_eq!(moved, Some(ResultTab::CaseDetails));
    }

    #[test]
    fn home_and_end_jump_to_the_edges() {
        let mut store = MemoryStore::new();
        let result = full_result();
        let mut resolver = TabResolver::restore(&result, &store);
        resolver.activate(ResultTab::Configuration, &result, &mut store);

        assert_eq!(resolver.handle_key(&key(KeyCode::Home), &result, &mut store), Some(ResultTab::CaseDetails));
        assert_eq!(resolver.handle_key(&key(KeyCode::End), &result, &mut store), Some(ResultTab::RawData));
    }

    #[test]
    fn enter_reactivates_without_moving() {
        let mut store = MemoryStore::new();
        let result = full_result();
        let mut resolver = TabResolver::restore(&result, &store);
        resolver.activate(ResultTab::TokenStatus, &result, &mut store);

        let moved = resolver.handle_key(&key(KeyCode::Enter), &result, &mut store);
        assert_eq!(moved, Some(ResultTab::TokenStatus));
        assert_eq!(resolver.active(), ResultTab::TokenStatus);
    }

    #[test]
    fn movement_skips_unavailable_tabs() {
        let mut store = MemoryStore::new();
        let result = bare_result();
        let mut resolver = TabResolver::restore(&result, &store);
        // Available set is [configuration, raw-data]; Next never lands on
        // the data-gated tabs
        assert_eq!(resolver.handle_key(&key(KeyCode::Right), &result, &mut store), Some(ResultTab::RawData));
        assert_eq!(resolver.handle_key(&key(KeyCode::Right), &result, &mut store), Some(ResultTab::Configuration));
    }

    #[test]
    fn unrelated_keys_are_not_consumed() {
        let mut store = MemoryStore::new();
        let result = full_result();
        let mut resolver = TabResolver::restore(&result, &store);
        assert_eq!(resolver.handle_key(&key(KeyCode::Char('x')), &result, &mut store), None);
    }

    #[test]
    fn keyboard_moves_persist_each_change() {
        let mut store = MemoryStore::new();
        let result = full_result();
        let mut resolver = TabResolver::restore(&result, &store);
        resolver.handle_key(&key(KeyCode::End), &result, &mut store);
        assert_eq!(store.get(ACTIVE_TAB_KEY).as_deref(), Some("raw-data"));
    }
}
