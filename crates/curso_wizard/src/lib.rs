//! Wizard state for Curso.
//!
//! [`WizardController`] owns the four-step navigation (topic, pillar,
//! variation, course) and the single outstanding request. [`CourseViewer`]
//! owns the presentation state of a finished course: tabs, module selection
//! and quiz answers. Neither touches the terminal; front ends drive them.

mod controller;
mod rich_text;
mod step;
mod viewer;

pub use controller::{Completion, Ticket, WizardController};
pub use rich_text::{RichLine, RichSegment, render_rich_text};
pub use step::WizardStep;
pub use viewer::{CourseViewer, MiniQuizResult, ViewerTab};
