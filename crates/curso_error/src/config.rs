//! Settings errors: a missing `--config` file, an unreadable `curso.toml`,
//! a bad `CURSO_*` value or a log file that cannot be opened.

/// Settings could not be loaded or applied.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// What went wrong, naming the offending file or setting
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use curso_error::ConfigError;
    ///
    /// let err = ConfigError::new("Config file not found: curso.toml");
    /// assert!(err.message.contains("curso.toml"));
    /// assert!(err.to_string().starts_with("Configuration Error: Config file not found"));
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

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Configuration Error: {} at line {} in {}",
            self.message, self.line, self.file
        )
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_caller_location() {
        let err = ConfigError::new("request_timeout_secs must be greater than zero");
        assert!(err.file.ends_with("config.rs"));
        assert!(err.to_string().contains("request_timeout_secs"));
    }
}
