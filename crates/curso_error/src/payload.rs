//! Errors for response payloads that cannot be turned into domain records.

/// Why a payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PayloadErrorKind {
    /// No JSON could be decoded, even after fenced-block and brace-span recovery
    #[display("Malformed payload: {_0}")]
    Malformed(String),
    /// JSON decoded but the record breaks a structural rule
    #[display("Invalid payload: {_0}")]
    Invalid(String),
}

/// Payload error with source location tracking.
///
/// # Examples
///
/// ```
/// use curso_error::{PayloadError, PayloadErrorKind};
///
/// let err = PayloadError::new(PayloadErrorKind::Invalid("empty title".into()));
/// assert!(format!("{}", err).contains("empty title"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Payload Error: {} at line {} in {}", kind, line, file)]
pub struct PayloadError {
    /// The kind of error that occurred
    pub kind: PayloadErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PayloadError {
    /// Create a new PayloadError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PayloadErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a structural validation failure.
    #[track_caller]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(PayloadErrorKind::Invalid(message.into()))
    }

    /// Shorthand for an undecodable payload.
    #[track_caller]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(PayloadErrorKind::Malformed(message.into()))
    }
}
