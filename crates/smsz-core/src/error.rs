use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmszError {
    #[error("Invalid gateway address: {0}")]
    InvalidAddress(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Gateway returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Request timed out after {0} ms")]
    Timeout(u64),
    #[error("Malformed gateway response: {0}")]
    MalformedResponse(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SmszError {
    /// True for failures where the gateway was never reached or never answered.
    pub fn is_transport(&self) -> bool {
        matches!(self, SmszError::Transport(_) | SmszError::Timeout(_))
    }
}

pub type Result<T> = std::result::Result<T, SmszError>;
