//! Core data types for the Curso course-generation wizard.
//!
//! This crate holds the records that flow through the wizard (pillars, lesson
//! variations, courses) and the provider-neutral request/response types used
//! to talk to the generative service.

mod course;
mod image;
mod pillar;
mod quiz;
mod request;

pub use course::{ChartDataPoint, Course, CourseBuilder, CourseBuilderError, CourseModule, MiniQuiz};
pub use image::ImageSize;
pub use pillar::{LessonVariation, Pillar, PillarSet, VariationSet};
pub use quiz::{OptionIndex, QuizQuestion};
pub use request::{GenerateRequest, GenerateResponse, ImageConfig, InlineImage};
