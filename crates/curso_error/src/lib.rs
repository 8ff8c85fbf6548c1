//! Error types for the Curso course-generation wizard.
//!
//! Every error records the file and line where it was raised. Domain errors are
//! collected into [`CursoError`], which is what the public operations of the
//! other crates return.

mod config;
mod image;
mod input;
mod payload;
mod tui;
mod upstream;

pub use config::ConfigError;
pub use image::{ImageError, ImageErrorKind};
pub use input::InputError;
pub use payload::{PayloadError, PayloadErrorKind};
pub use tui::TuiError;
pub use upstream::{UpstreamError, UpstreamErrorKind};

/// Crate-level error variants.
#[derive(Debug, Clone, derive_more::From)]
pub enum CursoErrorKind {
    /// Generative service failed or returned nothing usable
    Upstream(UpstreamError),
    /// Response text could not be decoded or failed validation
    Payload(PayloadError),
    /// Image generation failed
    Image(ImageError),
    /// Configuration error
    Config(ConfigError),
    /// Caller supplied unusable input
    Input(InputError),
    /// Terminal front-end error
    Tui(TuiError),
}

impl std::fmt::Display for CursoErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CursoErrorKind::Upstream(e) => write!(f, "{}", e),
            CursoErrorKind::Payload(e) => write!(f, "{}", e),
            CursoErrorKind::Image(e) => write!(f, "{}", e),
            CursoErrorKind::Config(e) => write!(f, "{}", e),
            CursoErrorKind::Input(e) => write!(f, "{}", e),
            CursoErrorKind::Tui(e) => write!(f, "{}", e),
        }
    }
}

/// Curso error with kind discrimination.
#[derive(Debug, Clone)]
pub struct CursoError(Box<CursoErrorKind>);

impl CursoError {
    /// Create a new error from a kind.
    pub fn new(kind: CursoErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CursoErrorKind {
        &self.0
    }

    /// Whether retrying the same request could succeed.
    ///
    /// Only upstream timeouts, transport failures and retryable HTTP statuses
    /// qualify; decode and validation failures are permanent.
    ///
    /// # Examples
    ///
    /// ```
    /// use curso_error::{CursoError, PayloadError, UpstreamError, UpstreamErrorKind};
    ///
    /// let busy = CursoError::from(UpstreamError::new(UpstreamErrorKind::HttpStatus {
    ///     status_code: 503,
    ///     message: "overloaded".to_string(),
    /// }));
    /// assert!(busy.is_transient());
    ///
    /// let bad = CursoError::from(PayloadError::malformed("no JSON"));
    /// assert!(!bad.is_transient());
    /// ```
    pub fn is_transient(&self) -> bool {
        match self.kind() {
            CursoErrorKind::Upstream(e) => e.is_transient(),
            _ => false,
        }
    }

    /// Whether the failure came from an undecodable or invalid payload.
    pub fn is_malformed_payload(&self) -> bool {
        matches!(self.kind(), CursoErrorKind::Payload(_))
    }
}

impl std::fmt::Display for CursoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Curso Error: {}", self.0)
    }
}

impl std::error::Error for CursoError {}

// Generic From implementation for any type that converts to CursoErrorKind
impl<T> From<T> for CursoError
where
    T: Into<CursoErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Curso operations.
pub type CursoResult<T> = std::result::Result<T, CursoError>;
