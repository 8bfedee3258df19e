//! Error types

/// Failure reported by the remote store, or on the way to it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    #[error("{0}")]
    Transport(String),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// Form input that never leaves the window.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please fill all fields")]
    MissingField,

    #[error("Pages must be a positive whole number")]
    InvalidPages,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing Supabase URL: set SUPABASE_URL or supabase_url in {settings}")]
    MissingUrl { settings: String },

    #[error("Missing Supabase API key: set SUPABASE_KEY or supabase_key in {settings}")]
    MissingKey { settings: String },

    #[error("Invalid Supabase URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid Supabase API key: {0}")]
    InvalidKey(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Why a catalog action did not complete
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}
