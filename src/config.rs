// Per-invocation configuration. Everything the transport needs is carried
// in `Config` so tests can point the client at a fake server with a fake
// token instead of relying on process-wide state.

use anyhow::{anyhow, Context, Result};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://www.moltbook.com/api/v1";
pub const DEFAULT_WEB_URL: &str = "https://moltbook.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Name of the credentials file looked up in the working directory.
const LOCAL_CREDENTIALS: &str = ".credentials";

#[derive(Clone, Debug)]
pub struct Config {
    /// API root; request paths are appended to it verbatim.
    pub base_url: String,
    /// Public site root, used to turn relative post URLs into links.
    pub web_url: String,
    pub token: String,
    pub timeout: Duration,
    /// Show a spinner on stderr while a request is in flight.
    pub show_progress: bool,
}

impl Config {
    /// Build a config with the default endpoints and the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Config {
            base_url: DEFAULT_API_URL.into(),
            web_url: DEFAULT_WEB_URL.into(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
            show_progress: std::io::stderr().is_terminal(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_web_url(mut self, url: impl Into<String>) -> Self {
        self.web_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }
}

/// Candidate credential files in lookup order when no explicit path is set:
/// `./.credentials`, then `<config dir>/moltbook/credentials`.
pub fn credential_candidates() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CREDENTIALS)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("moltbook").join("credentials"));
    }
    paths
}

/// Read the API token. An explicit path must exist; otherwise the first
/// existing candidate wins.
pub fn load_token(explicit: Option<&Path>) -> Result<String> {
    let path = match explicit {
        Some(p) => {
            if !p.exists() {
                return Err(anyhow!("credentials file not found: {}", p.display()));
            }
            p.to_path_buf()
        }
        None => credential_candidates()
            .into_iter()
            .find(|p| p.exists())
            .ok_or_else(|| anyhow!("credentials file not found"))?,
    };
    debug!(path = %path.display(), "loading credentials");
    read_token(&path)
}

fn read_token(path: &Path) -> Result<String> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("could not read credentials file {}", path.display()))?;
    let token = data.trim();
    if token.is_empty() {
        anyhow::bail!("credentials file {} is empty", path.display());
    }
    Ok(token.to_string())
}
