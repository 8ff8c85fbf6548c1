//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the curso binary.

mod commands;
mod generate;
mod tui_handler;

pub use commands::{Cli, Commands};
pub use generate::{handle_course, handle_image, handle_pillars, handle_variations};
pub use tui_handler::launch_tui;
