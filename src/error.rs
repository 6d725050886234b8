//! Error types for service calls.

/// Client error taxonomy.
///
/// Every failure surfaces directly to the caller; the client never
/// retries and applies no status-specific handling. Authentication
/// failure, rate limiting, and other rejections all arrive as
/// [`Service`](ClientError::Service).
#[derive(Debug)]
pub enum ClientError {
    /// Client-side setup problem (runtime construction, bad configuration)
    Config(String),
    /// The network exchange could not complete
    Transport(String),
    /// The service answered with a non-success status
    Service { status: u16, message: String },
}

impl ClientError {
    /// Diagnostic message. For service failures this is the raw response
    /// body text, or the generic fallback when the body was empty.
    pub fn message(&self) -> &str {
        match self {
            ClientError::Config(msg) => msg,
            ClientError::Transport(msg) => msg,
            ClientError::Service { message, .. } => message,
        }
    }

    /// HTTP status of a service failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Config(msg) => write!(f, "Config error: {msg}"),
            ClientError::Transport(msg) => write!(f, "Transport error: {msg}"),
            ClientError::Service { status, message } => {
                write!(f, "Service error ({status}): {message}")
            }
        }
    }
}

impl std::error::Error for ClientError {}
