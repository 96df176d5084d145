use std::fmt;

/// Closed set of failure kinds produced by the resource client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Status 400
    BadRequest,
    /// Status 401
    Unauthorized,
    /// Status 403
    Forbidden,
    /// Status 404
    NotFound,
    /// Status 429
    RateLimited,
    /// Status 500, 502 or 503
    ServerError,
    /// No response received, including timeouts
    NetworkError,
    /// Body could not be parsed as structured data
    SerializationError,
    /// Any other status
    Unknown,
}

impl ErrorKind {
    /// Whether a caller may reasonably repeat the request.
    ///
    /// The client itself never retries; this only informs the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorKind::RateLimited | ErrorKind::ServerError | ErrorKind::NetworkError
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::RateLimited => "RateLimited",
            ErrorKind::ServerError => "ServerError",
            ErrorKind::NetworkError => "NetworkError",
            ErrorKind::SerializationError => "SerializationError",
            ErrorKind::Unknown => "Unknown",
        };
        write!(f, "{}", name)
    }
}

/// Structured detail attached to a [`ClientError`]
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetail {
    /// Validation payload returned with a 400
    Validation(serde_json::Value),
    /// Wait the service asked for, as received (a number, or a numeric string)
    RetryAfter(serde_json::Value),
    /// Underlying transport message
    Transport(String),
    /// Excerpt of a body that failed to parse
    Body(String),
    /// Unrecognized status with its raw body
    Status { status: u16, body: String },
}

/// A classified failure from the remote service or the transport
#[derive(Debug, Clone, PartialEq)]
pub struct ClientError {
    pub kind: ErrorKind,
    pub message: String,
    pub detail: Option<ErrorDetail>,
}

impl ClientError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: ErrorDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Retry-after hint exactly as the service sent it, only ever set on `RateLimited`
    pub fn retry_after(&self) -> Option<&serde_json::Value> {
        match &self.detail {
            Some(ErrorDetail::RetryAfter(value)) => Some(value),
            _ => None,
        }
    }

    /// Retry-after hint as seconds, fractional values kept
    pub fn retry_after_secs(&self) -> Option<f64> {
        match self.retry_after()? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ClientError {}

/// Result type for resource client operations
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Custom error type for the CLI and renderer
#[derive(Debug)]
pub enum AcctError {
    /// The remote call failed
    Client(ClientError),
    /// Output could not be rendered with the given options
    Render(String),
    /// Token not found in any source
    TokenNotFound(String),
    /// Configuration error
    Config(String),
    /// JSON parsing or serialization error
    Json(String),
    /// Malformed command-line value
    InvalidArgument(String),
}

impl fmt::Display for AcctError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcctError::Client(e) => write!(f, "{}", e),
            AcctError::Render(msg) => write!(f, "Render error: {}", msg),
            AcctError::TokenNotFound(msg) => write!(f, "{}", msg),
            AcctError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AcctError::Json(msg) => write!(f, "JSON error: {}", msg),
            AcctError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for AcctError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AcctError::Client(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ClientError> for AcctError {
    fn from(err: ClientError) -> Self {
        AcctError::Client(err)
    }
}

impl From<serde_json::Error> for AcctError {
    fn from(err: serde_json::Error) -> Self {
        AcctError::Json(err.to_string())
    }
}

/// Result type alias for CLI and rendering operations
pub type Result<T> = std::result::Result<T, AcctError>;
