//! Credential form state: three fields and a focus cursor.
//!
//! The form replaces the main content area until the user submits or the
//! app exits. Field validation is deliberately trivial: every field must
//! be non-empty before a lookup can start.

/// Which form field currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Environment,
    ClientId,
    ClientSecret,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Environment => Self::ClientId,
            Self::ClientId => Self::ClientSecret,
            Self::ClientSecret => Self::Environment,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Environment => Self::ClientSecret,
            Self::ClientId => Self::Environment,
            Self::ClientSecret => Self::ClientId,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Environment => "Environment",
            Self::ClientId => "Client ID",
            Self::ClientSecret => "Client Secret",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub environment: String,
    pub client_id: String,
    pub client_secret: String,
    pub focus: FormField,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            environment: "sandbox".to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            focus: FormField::Environment,
        }
    }

    /// Prefill from the environment (populated by dotenv at startup).
    pub fn from_env() -> Self {
        let mut form = Self::new();
        if let Ok(env) = std::env::var("CASEVIEW_ENVIRONMENT") {
            form.environment = env;
        }
        if let Ok(id) = std::env::var("CASEVIEW_CLIENT_ID") {
            form.client_id = id;
        }
        if let Ok(secret) = std::env::var("CASEVIEW_CLIENT_SECRET") {
            form.client_secret = secret;
        }
        form
    }

    pub fn focused_value(&self) -> &str {
        match self.focus {
            FormField::Environment => &self.environment,
            FormField::ClientId => &self.client_id,
            FormField::ClientSecret => &self.client_secret,
        }
    }

    pub fn focused_value_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Environment => &mut self.environment,
            FormField::ClientId => &mut self.client_id,
            FormField::ClientSecret => &mut self.client_secret,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn type_char(&mut self, c: char) {
        self.focused_value_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.focused_value_mut().pop();
    }

    pub fn paste(&mut self, text: &str) {
        // Credentials are single-line values; strip any pasted newlines
        let cleaned: String = text.chars().filter(|c| *c != '\n').collect();
        self.focused_value_mut().push_str(&cleaned);
    }

    /// All fields populated; the submit action is allowed.
    pub fn is_complete(&self) -> bool {
        !self.environment.trim().is_empty()
            && !self.client_id.trim().is_empty()
            && !self.client_secret.trim().is_empty()
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_through_all_fields() {
        let mut form = FormState::new();
        assert_eq!(form.focus, FormField::Environment);
        form.focus_next();
        assert_eq!(form.focus, FormField::ClientId);
        form.focus_next();
        assert_eq!(form.focus, FormField::ClientSecret);
        form.focus_next();
        assert_eq!(form.focus, FormField::Environment);
        form.focus_prev();
        assert_eq!(form.focus, FormField::ClientSecret);
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut form = FormState::new();
        form.focus = FormField::ClientId;
        form.type_char('a');
        form.type_char('b');
        form.backspace();
        assert_eq!(form.client_id, "a");
        assert!(form.client_secret.is_empty());
    }

    #[test]
    fn paste_strips_newlines() {
        let mut form = FormState::new();
        form.focus = FormField::ClientSecret;
        form.paste("abc\ndef\n");
        assert_eq!(form.client_secret, "abcdef");
    }

    #[test]
    fn complete_requires_all_fields() {
        let mut form = FormState::new();
        assert!(!form.is_complete());
        form.client_id = "id".to_string();
        form.client_secret = "secret".to_string();
        assert!(form.is_complete());
        form.environment = "  ".to_string();
        assert!(!form.is_complete());
    }
}
