//! Layered application settings.
//!
//! Sources, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. `curso.toml` in the user config directory (`~/.config/curso/` on Linux)
//! 3. `curso.toml` in the working directory
//! 4. A file passed with `--config` (must exist)
//! 5. `CURSO_*` environment variables, e.g. `CURSO_MODEL`, `CURSO_GROUNDING`
//!
//! The API key is read from `GEMINI_API_KEY`, then `API_KEY`, then the
//! `api_key` setting.

use config::{Config, Environment, File, Map};
use curso_content::{ContentRequestor, DEFAULT_IMAGE_MODEL, RequestPolicy};
use curso_core::ImageSize;
use curso_error::{ConfigError, CursoResult, UpstreamError, UpstreamErrorKind};
use curso_models::GeminiClient;
use derive_builder::Builder;
use derive_getters::Getters;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Text model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// File name searched for in each config location.
pub const CONFIG_FILE_NAME: &str = "curso.toml";

const ENV_PREFIX: &str = "CURSO";
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Application settings.
///
/// # Examples
///
/// ```
/// use curso::CursoConfigBuilder;
///
/// let config = CursoConfigBuilder::default()
///     .model("gemini-2.5-pro")
///     .grounding(false)
///     .build()
///     .unwrap();
/// assert_eq!(config.model(), "gemini-2.5-pro");
/// assert_eq!(*config.request_timeout_secs(), 90);
/// ```
#[derive(Clone, PartialEq, Deserialize, Getters, Builder)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct CursoConfig {
    /// Model for pillars, variations and courses
    model: String,
    /// Model for module images
    image_model: String,
    /// Override for the service root URL
    #[builder(setter(into, strip_option))]
    base_url: Option<String>,
    /// Deadline per request attempt, in seconds
    request_timeout_secs: u64,
    /// Delay before the single retry, in milliseconds
    retry_backoff_ms: u64,
    /// Ask the service to ground answers in web search
    grounding: bool,
    /// Resolution for module images
    image_size: ImageSize,
    /// Service credential
    #[getter(skip)]
    #[builder(setter(into, strip_option))]
    api_key: Option<String>,
}

impl Default for CursoConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            base_url: None,
            request_timeout_secs: 90,
            retry_backoff_ms: 500,
            grounding: true,
            image_size: ImageSize::default(),
            api_key: None,
        }
    }
}

impl std::fmt::Debug for CursoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursoConfig")
            .field("model", &self.model)
            .field("image_model", &self.image_model)
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .field("grounding", &self.grounding)
            .field("image_size", &self.image_size)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Directory holding `curso.toml` and `curso.log`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("curso"))
}

impl CursoConfig {
    /// Load settings from the standard locations and the process environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when `explicit` does not exist, a file cannot
    /// be parsed, or a value is out of range.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> CursoResult<Self> {
        let mut files = Vec::new();
        if let Some(dir) = config_dir() {
            files.push(dir.join(CONFIG_FILE_NAME));
        }
        files.push(PathBuf::from(CONFIG_FILE_NAME));

        let env: Map<String, String> = std::env::vars().collect();
        Self::from_sources(&files, explicit, env)
    }

    /// Load settings from the given optional files, an optional required
    /// file and an explicit environment.
    pub fn from_sources(
        files: &[PathBuf],
        explicit: Option<&Path>,
        env: Map<String, String>,
    ) -> CursoResult<Self> {
        let mut builder = Config::builder();
        for file in files {
            builder = builder.add_source(File::from(file.as_path()).required(false));
        }
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::new(format!(
                    "Config file not found: {}",
                    path.display()
                ))
                .into());
            }
            builder = builder.add_source(File::from(path).required(true));
        }

        let api_key_from_env = API_KEY_VARS
            .iter()
            .find_map(|var| env.get(*var).filter(|v| !v.trim().is_empty()).cloned());

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(Some(env)),
        );

        let settings = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to read configuration: {}", e)))?;
        let mut config: CursoConfig = settings
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Invalid configuration: {}", e)))?;

        if api_key_from_env.is_some() {
            config.api_key = api_key_from_env;
        }
        config.validate()?;

        debug!(config = ?config, "Configuration loaded");
        Ok(config)
    }

    fn validate(&self) -> CursoResult<()> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::new("request_timeout_secs must be greater than zero").into());
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::new("model must not be empty").into());
        }
        Ok(())
    }

    /// Override the grounding setting.
    pub fn with_grounding(mut self, grounding: bool) -> Self {
        self.grounding = grounding;
        self
    }

    /// Whether a non-blank API key is available.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Deadline and retry settings for content requests.
    pub fn request_policy(&self) -> RequestPolicy {
        RequestPolicy::new(
            Duration::from_secs(self.request_timeout_secs),
            Duration::from_millis(self.retry_backoff_ms),
        )
    }

    /// Build the Gemini client.
    ///
    /// # Errors
    ///
    /// Fails with `MissingApiKey` before any request is made when no key is
    /// configured.
    pub fn gemini_client(&self) -> CursoResult<GeminiClient> {
        let api_key = self
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| UpstreamError::new(UpstreamErrorKind::MissingApiKey))?;

        let client = GeminiClient::new(
            api_key,
            self.model.clone(),
            Duration::from_secs(self.request_timeout_secs),
        )?;
        Ok(match &self.base_url {
            Some(url) => client.with_base_url(url.clone()),
            None => client,
        })
    }

    /// Build the content requestor every front end talks to.
    #[instrument(skip(self), fields(model = %self.model, grounding = self.grounding))]
    pub fn requestor(&self) -> CursoResult<ContentRequestor<GeminiClient>> {
        let requestor = ContentRequestor::new(self.gemini_client()?)
            .with_policy(self.request_policy())
            .with_image_model(self.image_model.clone())
            .with_grounding(self.grounding);
        info!("Content requestor ready");
        Ok(requestor)
    }
}
