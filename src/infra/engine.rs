//! Processing engine boundary.
//!
//! The UI consumes the engine purely as an event source: initialized,
//! realtime updates, one result, or an error, delivered over an mpsc
//! channel from a background thread. Everything behind `spawn` is a
//! stand-in driver that walks the step catalog and synthesizes a result;
//! replacing it with a real client changes nothing on the consuming side.
//!
//! Cancellation is a one-way flag. The driver checks it between
//! emissions and mid-sleep; once set, no further events are sent and the
//! result is never produced. Updates already sent stay recorded.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use cv_base::config::{STEP_COMPLETE, StepCatalog};
use cv_base::types::{CaseDetails, CaseResult, EnvironmentConfig, OAuthToken, ProcessingMetadata};
use cv_mod_token::mask_token;
use cv_mod_updates::{RealtimeUpdate, UpdateLevel};

/// Slice length for interruptible sleeps inside the driver (ms)
const CANCEL_POLL_MS: u64 = 25;

/// Lifetime of the synthesized access token (seconds)
const TOKEN_LIFETIME_SECS: i64 = 3_600;

#[derive(Debug, Clone)]
pub struct ProcessingRequest {
    pub environment: String,
    pub client_id: String,
    pub client_secret: SecretString,
}

/// Events emitted by the engine, in arrival order.
#[derive(Debug)]
pub enum EngineEvent {
    /// Engine accepted the request and is about to start
    Initialized,
    Update(RealtimeUpdate),
    /// Terminal: exactly one per successful session
    Result(Box<CaseResult>),
    /// Terminal: the session failed
    Error { message: String, context: String },
}

#[derive(Debug, Error)]
enum EngineError {
    #[error("client id is required")]
    MissingClientId,
    #[error("client secret is required")]
    MissingClientSecret,
}

/// Cancel handle for a running session. Dropping it does not stop the
/// driver; cancellation is always an explicit signal.
pub struct EngineHandle {
    cancel: Arc<AtomicBool>,
}

impl EngineHandle {
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }
}

/// Start a processing session on a background thread.
pub fn spawn(request: ProcessingRequest, catalog: StepCatalog, tx: Sender<EngineEvent>) -> EngineHandle {
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    thread::spawn(move || run_driver(request, catalog, tx, flag));
    EngineHandle { cancel }
}

fn run_driver(
    request: ProcessingRequest,
    catalog: StepCatalog,
    tx: Sender<EngineEvent>,
    cancel: Arc<AtomicBool>,
) {
    if let Err(err) = validate(&request) {
        let _ = tx.send(EngineEvent::Error {
            message: err.to_string(),
            context: "credential validation".to_string(),
        });
        return;
    }

    let started = Instant::now();
    let _ = tx.send(EngineEvent::Initialized);

    let mut sequence = 0usize;
    for step in catalog.steps() {
        if cancel.load(Ordering::SeqCst) {
            log::info!("engine cancelled at step {}", step.id);
            return;
        }
        sequence += 1;
        let level = if step.id == STEP_COMPLETE { UpdateLevel::Success } else { UpdateLevel::Info };
        let _ = tx.send(EngineEvent::Update(RealtimeUpdate {
            id: format!("U{sequence}"),
            timestamp: Utc::now().to_rfc3339(),
            step: step.id.to_string(),
            message: step_message(step.id, &request),
            level,
        }));
        if !sleep_unless_cancelled(step.estimated_ms, &cancel) {
            log::info!("engine cancelled during step {}", step.id);
            return;
        }
    }

    if cancel.load(Ordering::SeqCst) {
        return;
    }
    let duration_ms = started.elapsed().as_millis() as u64;
    let result = build_result(&request, duration_ms, catalog.len());
    let _ = tx.send(EngineEvent::Result(Box::new(result)));
}

fn validate(request: &ProcessingRequest) -> Result<(), EngineError> {
    if request.client_id.trim().is_empty() {
        return Err(EngineError::MissingClientId);
    }
    if request.client_secret.expose_secret().trim().is_empty() {
        return Err(EngineError::MissingClientSecret);
    }
    Ok(())
}

/// Sleep in short slices so a cancel lands within ~25ms.
/// Returns false when cancelled mid-sleep.
fn sleep_unless_cancelled(total_ms: u64, cancel: &AtomicBool) -> bool {
    let mut remaining = total_ms;
    while remaining > 0 {
        if cancel.load(Ordering::SeqCst) {
            return false;
        }
        let slice = remaining.min(CANCEL_POLL_MS);
        thread::sleep(Duration::from_millis(slice));
        remaining -= slice;
    }
    true
}

fn step_message(step_id: &str, request: &ProcessingRequest) -> String {
    use cv_base::config::{STEP_AUTHENTICATING, STEP_FETCHING, STEP_PROCESSING, STEP_VALIDATING};
    match step_id {
        STEP_VALIDATING => format!("Validating credentials for client {}", request.client_id),
        STEP_AUTHENTICATING => format!("Requesting token from {} environment", request.environment),
        STEP_FETCHING => "Retrieving case records".to_string(),
        STEP_PROCESSING => "Assembling case summary".to_string(),
        STEP_COMPLETE => "Case lookup complete".to_string(),
        other => format!("Working on {other}"),
    }
}

fn build_result(request: &ProcessingRequest, duration_ms: u64, steps_completed: usize) -> CaseResult {
    let issued = Utc::now();
    let raw_token = format!("cv-{}-{:x}", request.environment, issued.timestamp_micros());
    let token_hint = mask_token(&raw_token);

    CaseResult {
        base_url: format!("https://api.{}.cases.example.com", request.environment),
        auth_mode: "client-credentials".to_string(),
        token_hint,
        config: EnvironmentConfig {
            environment: request.environment.clone(),
            api_version: "v2".to_string(),
            timeout_ms: 30_000,
            retry_limit: 3,
        },
        case_details: Some(CaseDetails {
            case_id: format!("CASE-{}", request.client_id.len() * 271 + 1_000),
            status: "open".to_string(),
            summary: format!("Most recent case on record for client {}", request.client_id),
            opened_at: issued.to_rfc3339(),
            assignee: None,
        }),
        oauth_token: Some(OAuthToken {
            access_token: SecretString::from(raw_token),
            token_type: "Bearer".to_string(),
            expires_at: (issued + chrono::Duration::seconds(TOKEN_LIFETIME_SECS)).to_rfc3339(),
            expires_in: TOKEN_LIFETIME_SECS as u64,
        }),
        processing_metadata: Some(ProcessingMetadata {
            duration_ms,
            steps_completed,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cv_base::config::StepSpec;
    use std::sync::mpsc;

    fn request() -> ProcessingRequest {
        ProcessingRequest {
            environment: "sandbox".to_string(),
            client_id: "client-1".to_string(),
            client_secret: SecretString::from("hunter2hunter2"),
        }
    }

    fn fast_catalog() -> StepCatalog {
        StepCatalog::new(vec![
            StepSpec { id: "validating", label: "Validating", estimated_ms: 1 },
            StepSpec { id: "fetching-case-data", label: "Fetching", estimated_ms: 1 },
            StepSpec { id: "complete", label: "Complete", estimated_ms: 0 },
        ])
    }

    fn collect_events(rx: mpsc::Receiver<EngineEvent>) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.recv_timeout(Duration::from_secs(5)) {
            events.push(event);
        }
        events
    }

    #[test]
    fn emits_initialized_updates_then_one_result() {
        let (tx, rx) = mpsc::channel();
        let _handle = spawn(request(), fast_catalog(), tx);
        let events = collect_events(rx);

        assert!(matches!(events.first(), Some(EngineEvent::Initialized)));
        let updates: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                EngineEvent::Update(u) => Some(u),
                _ => None,
            })
            .collect();
        assert_eq!(updates.len(), 3);
        assert_eq!(updates[0].step, "validating");
        assert_eq!(updates[2].level, UpdateLevel::Success);

        let results = events.iter().filter(|e| matches!(e, EngineEvent::Result(_))).count();
        assert_eq!(results, 1);
        assert!(matches!(events.last(), Some(EngineEvent::Result(_))));
    }

    #[test]
    fn result_payload_supports_every_view() {
        let (tx, rx) = mpsc::channel();
        let _handle = spawn(request(), fast_catalog(), tx);
        let events = collect_events(rx);
        let Some(EngineEvent::Result(result)) = events.last() else {
            panic!("expected a result event");
        };
        assert!(result.has_case_details());
        assert!(result.has_token());
        let token = result.oauth_token.as_ref().unwrap();
        assert_eq!(token.expires_in, 3_600);
        // The hint never contains the raw value
        assert_ne!(token.access_token.expose_secret(), result.token_hint);
    }

    #[test]
    fn missing_credentials_produce_an_error_event() {
        let (tx, rx) = mpsc::channel();
        let mut bad = request();
        bad.client_id = String::new();
        let _handle = spawn(bad, fast_catalog(), tx);
        let events = collect_events(rx);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            EngineEvent::Error { context, .. } if context == "credential validation"
        ));
    }

    #[test]
    fn cancel_stops_emission_and_suppresses_the_result() {
        let slow = StepCatalog::new(vec![
            StepSpec { id: "validating", label: "Validating", estimated_ms: 5_000 },
            StepSpec { id: "complete", label: "Complete", estimated_ms: 0 },
        ]);
        let (tx, rx) = mpsc::channel();
        let handle = spawn(request(), slow, tx);

        // Let the driver reach the first sleep, then cancel
        assert!(matches!(rx.recv_timeout(Duration::from_secs(2)), Ok(EngineEvent::Initialized)));
        assert!(matches!(rx.recv_timeout(Duration::from_secs(2)), Ok(EngineEvent::Update(_))));
        handle.cancel();
        assert!(handle.is_cancelled());

        // Channel closes without any further event
        let rest = collect_events(rx);
        assert!(rest.is_empty());
    }
}
