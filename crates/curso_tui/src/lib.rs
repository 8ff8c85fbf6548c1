//! Terminal front end for the Curso wizard.
//!
//! [`App`] holds everything the screen shows and turns key presses into
//! [`Action`]s. [`run`] owns the terminal, executes those actions on
//! background tasks and feeds their results back as [`TaskMessage`]s.

mod app;
mod runner;
mod ui;

pub use app::{Action, App, TaskMessage};
pub use runner::run;
