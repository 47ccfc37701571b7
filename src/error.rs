use thiserror::Error;

/// Unified error type for release-bot operations
#[derive(Error, Debug)]
pub enum ReleaseBotError {
    #[error("⛔️ Missing GITHUB_TOKEN")]
    MissingCredential,

    #[error("{0}")]
    MalformedRef(String),

    #[error("Failed to access commits")]
    NoCommitsAvailable,

    #[error("Manifest unreadable: {0}")]
    ManifestUnreadable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("GitHub API error ({status}): {message}")]
    GitHub { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Command `{command}` failed with exit code {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-bot
pub type Result<T> = std::result::Result<T, ReleaseBotError>;

impl ReleaseBotError {
    /// Create a malformed ref error with context
    pub fn malformed_ref(msg: impl Into<String>) -> Self {
        ReleaseBotError::MalformedRef(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        ReleaseBotError::ManifestUnreadable(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseBotError::Config(msg.into())
    }

    /// Create a host API error from a response status and body
    pub fn github(status: u16, message: impl Into<String>) -> Self {
        ReleaseBotError::GitHub {
            status,
            message: message.into(),
        }
    }
}
