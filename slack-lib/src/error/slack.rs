//! Slack-specific error detail

/// Detailed error information from a Slack API envelope.
///
/// A failed call comes back as `{"ok": false, "error": "<code>"}`, often
/// with `response_metadata.messages` explaining the failure and, for scope
/// errors, the `needed`/`provided` scope lists.
#[derive(Debug, Clone)]
pub struct SlackErrorDetail {
    /// The error code (e.g. `channel_not_found`, `ratelimited`).
    pub code: String,
    /// Warning code, if the response carried one alongside the error.
    pub warning: Option<String>,
    /// Messages from `response_metadata`, if any.
    pub messages: Vec<String>,
    /// Scopes the call needed (`missing_scope` errors).
    pub needed: Option<String>,
    /// Scopes the token actually has (`missing_scope` errors).
    pub provided: Option<String>,
}

impl SlackErrorDetail {
    /// Creates a detail with just the error code.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            warning: None,
            messages: Vec::new(),
            needed: None,
            provided: None,
        }
    }

    /// Returns `true` if the error code matches.
    pub fn has_code(&self, code: &str) -> bool {
        self.code == code
    }
}

impl std::fmt::Display for SlackErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.messages.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{} ({})", self.code, self.messages.join("; "))
        }
    }
}
