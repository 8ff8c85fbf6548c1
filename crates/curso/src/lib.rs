//! Curso: a Spanish course-generation wizard.
//!
//! A topic goes in; three grounded Gemini requests later the user has a
//! multi-module course with a chart and a quiz. This facade crate wires the
//! workspace together:
//!
//! - [`CursoConfig`] layers defaults, `curso.toml` files and `CURSO_*`
//!   environment variables, and builds the [`ContentRequestor`].
//! - [`init_logging`] installs the tracing subscriber.
//! - The `curso` binary exposes the wizard and one-shot subcommands.
//!
//! # Example
//!
//! ```no_run
//! use curso::CursoConfig;
//!
//! # async fn example() -> curso::CursoResult<()> {
//! let config = CursoConfig::load(None)?;
//! let requestor = config.requestor()?;
//! let pillars = requestor.request_pillars("Cocina Vegana").await?;
//! for pillar in pillars.pillars() {
//!     println!("{}", pillar.title());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
mod config;
mod observability;

pub use config::{CONFIG_FILE_NAME, CursoConfig, CursoConfigBuilder, DEFAULT_MODEL, config_dir};
pub use observability::{LOG_FILE_NAME, LogTarget, init_logging};

pub use curso_content::{
    ContentRequestor, PendingRequest, RequestPolicy, StepOutcome, decode_data_uri,
    extract_sources, parse_structured_payload,
};
pub use curso_core::{
    ChartDataPoint, Course, CourseModule, ImageSize, LessonVariation, MiniQuiz, OptionIndex,
    Pillar, PillarSet, QuizQuestion, VariationSet,
};
pub use curso_error::{CursoError, CursoErrorKind, CursoResult};
pub use curso_interface::GenerationDriver;
pub use curso_models::GeminiClient;
pub use curso_wizard::{CourseViewer, WizardController, WizardStep};
