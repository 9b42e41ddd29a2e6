//! Result payload types shared across the workspace.
//!
//! A `CaseResult` is what the processing engine hands back on success.
//! The optional fields drive result-view availability: a view that
//! inspects `case_details` or `oauth_token` only exists when the field
//! does.

use secrecy::SecretString;
use serde::Serialize;

/// OAuth token material attached to a successful lookup.
///
/// The raw access token is wrapped in `SecretString` and excluded from
/// serialization: the raw-data view and file export never contain it.
/// The only way to obtain the full value is the explicit copy action.
#[derive(Debug, Clone, Serialize)]
pub struct OAuthToken {
    #[serde(skip_serializing)]
    pub access_token: SecretString,
    pub token_type: String,
    /// RFC 3339 deadline the countdown is derived from
    pub expires_at: String,
    /// Original lifetime in seconds, informational only
    pub expires_in: u64,
}

/// Case lookup outcome, present when the engine found a matching case.
#[derive(Debug, Clone, Serialize)]
pub struct CaseDetails {
    pub case_id: String,
    pub status: String,
    pub summary: String,
    pub opened_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

/// Environment the lookup ran against.
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub api_version: String,
    pub timeout_ms: u64,
    pub retry_limit: u32,
}

/// Timing and provenance data the engine records about its own run.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingMetadata {
    pub duration_ms: u64,
    pub steps_completed: usize,
    pub engine_version: String,
}

/// The result event payload. Optional fields gate which result views are
/// available; `config` and the top-level fields are always present.
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    pub base_url: String,
    pub auth_mode: String,
    /// Short non-sensitive token fingerprint for display headers
    pub token_hint: String,
    pub config: EnvironmentConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_details: Option<CaseDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_token: Option<OAuthToken>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_metadata: Option<ProcessingMetadata>,
}

impl CaseResult {
    pub fn has_case_details(&self) -> bool {
        self.case_details.is_some()
    }

    pub fn has_token(&self) -> bool {
        self.oauth_token.is_some()
    }
}
