//! Input error types.

/// Invalid caller input with source location.
#[derive(Debug, Clone)]
pub struct InputError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl InputError {
    /// Create a new InputError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use curso_error::InputError;
    ///
    /// let err = InputError::new("Topic must not be empty");
    /// assert!(err.message.contains("must not be empty"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Input Error: {} at line {} in {}",
            self.message, self.line, self.file
        )
    }
}

impl std::error::Error for InputError {}
