// Error taxonomy for the CLI. Every layer returns `CliError` and only
// `main` turns it into stderr output and a process exit code.

use thiserror::Error;

/// All the ways a single invocation can fail after argument parsing.
#[derive(Debug, Error)]
pub enum CliError {
    /// Credentials missing or unreadable. Raised before any network call.
    #[error("{0:#}")]
    Config(#[from] anyhow::Error),

    #[error("Not found")]
    NotFound,

    #[error("Authentication failed - check your API key")]
    AuthFailed,

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Could not connect to {host}")]
    Connection { host: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid response from server")]
    Decode,

    /// The server answered with a `success: false` envelope.
    #[error("{message}")]
    Api {
        message: String,
        hint: Option<String>,
        /// Server-supplied wait, as text.
        retry_after_minutes: Option<String>,
    },
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Lines written to stderr, each as `(label, text)`. The first line is
    /// always the `Error` line.
    pub fn report_lines(&self) -> Vec<(&'static str, String)> {
        let mut lines = vec![("Error", self.to_string())];
        match self {
            CliError::Config(_) => {
                lines.push(("Hint", "Create a .credentials file with your API key".into()));
            }
            CliError::Api {
                hint,
                retry_after_minutes,
                ..
            } => {
                if let Some(h) = hint.as_deref().filter(|h| !h.is_empty()) {
                    lines.push(("Hint", h.to_string()));
                }
                if let Some(n) = retry_after_minutes.as_deref().filter(|n| !n.is_empty()) {
                    lines.push(("Retry in", format!("{} minutes", n)));
                }
            }
            _ => {}
        }
        lines
    }
}
