//! Default-display masking for token values.
//!
//! The masked form is the only thing rendered; the complete string is
//! reachable solely through the explicit copy action.

/// Fixed marker shown for tokens too short to mask meaningfully.
pub const REDACTED_MARKER: &str = "••••••••";

/// Tokens of 8 characters or fewer collapse to the fixed marker; longer
/// tokens keep their first and last four characters around a separator.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return REDACTED_MARKER.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
