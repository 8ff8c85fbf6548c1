//! CLI command definitions.

use clap::{Parser, Subcommand};
use curso_core::ImageSize;
use std::path::PathBuf;

/// Curso: turn a topic into a Spanish mini-course.
#[derive(Parser, Debug)]
#[command(name = "curso")]
#[command(about = "Generate Spanish mini-courses with Gemini and Google Search grounding")]
#[command(version)]
pub struct Cli {
    /// Path to a configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file (TUI mode defaults to curso.log in the config directory)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Emit JSON log lines on stderr (ignored in TUI mode)
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Disable search grounding and request structured output instead
    #[arg(long, global = true)]
    pub no_grounding: bool,

    /// Subcommand; the interactive wizard when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Launch the interactive wizard
    Tui {
        /// Resolution for module images (1K, 2K, 4K)
        #[arg(long)]
        size: Option<ImageSize>,
    },

    /// Propose thematic pillars for a topic
    Pillars {
        /// Course topic
        topic: String,
    },

    /// Propose lesson variations for a pillar
    Variations {
        /// Course topic
        topic: String,
        /// Title of the chosen pillar
        pillar: String,
    },

    /// Generate a full course
    Course {
        /// Course topic
        topic: String,
        /// Title of the chosen pillar
        pillar: String,
        /// Title of the chosen lesson variation
        variation: String,
        /// Print the course as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a module header image
    Image {
        /// Module title
        title: String,
        /// Visual keyword for the image
        keyword: String,
        /// Resolution (1K, 2K, 4K)
        #[arg(long, default_value = "1K")]
        size: ImageSize,
        /// Output file for the decoded image
        #[arg(long)]
        out: PathBuf,
    },
}

impl Cli {
    /// Subcommand to run, falling back to the wizard.
    pub fn selected_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Tui { size: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_tui() {
        let cli = Cli::parse_from(["curso"]);
        assert_eq!(cli.selected_command(), Commands::Tui { size: None });
    }

    #[test]
    fn test_course_arguments() {
        let cli = Cli::parse_from(["curso", "course", "Yoga", "Respiración", "Pranayama", "--json"]);
        assert_eq!(
            cli.selected_command(),
            Commands::Course {
                topic: "Yoga".into(),
                pillar: "Respiración".into(),
                variation: "Pranayama".into(),
                json: true,
            }
        );
    }

    #[test]
    fn test_image_size_parsed() {
        let cli = Cli::parse_from([
            "curso", "image", "Intro", "yoga mat", "--size", "2K", "--out", "a.png",
        ]);
        match cli.selected_command() {
            Commands::Image { size, out, .. } => {
                assert_eq!(size, ImageSize::TwoK);
                assert_eq!(out, PathBuf::from("a.png"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bad_image_size_rejected() {
        let result = Cli::try_parse_from(["curso", "image", "a", "b", "--size", "8K", "--out", "x"]);
        assert!(result.is_err());
    }
}
