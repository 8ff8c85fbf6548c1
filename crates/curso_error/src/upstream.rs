//! Upstream generative service errors.

/// Failure conditions of the generative service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum UpstreamErrorKind {
    /// API key not found in environment or configuration
    #[display("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,
    /// Connection or transport failure before a response arrived
    #[display("Request failed: {_0}")]
    Transport(String),
    /// The attempt exceeded the configured deadline
    #[display("Request timed out after {_0} ms")]
    Timeout(u64),
    /// Service answered with a non-success status
    #[display("HTTP {status_code} error: {message}")]
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Error body returned by the service
        message: String,
    },
    /// Service answered but produced no text
    #[display("Service returned no text")]
    EmptyResponse,
    /// Response body was not the envelope the service documents
    #[display("Unreadable response envelope: {_0}")]
    Envelope(String),
}

impl UpstreamErrorKind {
    /// Whether a second attempt has a chance of succeeding.
    ///
    /// # Examples
    ///
    /// ```
    /// use curso_error::UpstreamErrorKind;
    ///
    /// assert!(UpstreamErrorKind::Timeout(90_000).is_transient());
    /// assert!(!UpstreamErrorKind::EmptyResponse.is_transient());
    /// ```
    pub fn is_transient(&self) -> bool {
        match self {
            UpstreamErrorKind::Transport(_) | UpstreamErrorKind::Timeout(_) => true,
            UpstreamErrorKind::HttpStatus { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }
}

/// Upstream error with source location tracking.
///
/// # Examples
///
/// ```
/// use curso_error::{UpstreamError, UpstreamErrorKind};
///
/// let err = UpstreamError::new(UpstreamErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Upstream Error: {} at line {} in {}", kind, line, file)]
pub struct UpstreamError {
    /// The kind of error that occurred
    pub kind: UpstreamErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl UpstreamError {
    /// Create a new UpstreamError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: UpstreamErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the failure is worth one more attempt.
    pub fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }
}
