//! The finished course and its parts.

use crate::QuizQuestion;
use curso_error::PayloadError;
use derive_getters::Getters;
use serde::Serialize;

/// A single value plotted in the course chart.
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
pub struct ChartDataPoint {
    /// Category label
    label: String,
    /// Finite numeric value
    value: f64,
}

impl ChartDataPoint {
    /// Build a data point, rejecting NaN and infinities.
    ///
    /// # Examples
    ///
    /// ```
    /// use curso_core::ChartDataPoint;
    ///
    /// assert!(ChartDataPoint::new("2024", 12.5).is_ok());
    /// assert!(ChartDataPoint::new("2025", f64::NAN).is_err());
    /// ```
    #[track_caller]
    pub fn new(label: impl Into<String>, value: f64) -> Result<Self, PayloadError> {
        let label = label.into();
        if !value.is_finite() {
            return Err(PayloadError::invalid(format!(
                "chart value for '{}' is not a finite number",
                label
            )));
        }
        Ok(Self { label, value })
    }
}

/// A review question attached to one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct MiniQuiz {
    /// The question itself
    question: QuizQuestion,
    /// Why the correct option is correct
    explanation: Option<String>,
}

impl MiniQuiz {
    /// Pair a question with its optional explanation.
    pub fn new(question: QuizQuestion, explanation: Option<String>) -> Self {
        Self {
            question,
            explanation: explanation.filter(|e| !e.trim().is_empty()),
        }
    }
}

/// One lesson of the course. Modules are shown in the order received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct CourseModule {
    /// Module title
    title: String,
    /// Markdown-like body (`**bold**` and line breaks)
    content: String,
    /// English keyword describing a header image
    image_keyword: String,
    /// Short summary bullets
    key_points: Vec<String>,
    /// Optional review question
    mini_quiz: Option<MiniQuiz>,
}

impl CourseModule {
    /// Build a module, rejecting an empty title.
    #[track_caller]
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        image_keyword: impl Into<String>,
        key_points: Vec<String>,
        mini_quiz: Option<MiniQuiz>,
    ) -> Result<Self, PayloadError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(PayloadError::invalid("course module has an empty title"));
        }
        Ok(Self {
            title,
            content: content.into(),
            image_keyword: image_keyword.into(),
            key_points: key_points
                .into_iter()
                .filter(|p| !p.trim().is_empty())
                .collect(),
            mini_quiz,
        })
    }
}

/// A generated course: modules, a chart and a final quiz.
///
/// Built through [`CourseBuilder`], whose `build` checks that the course has a
/// title, at least one module and at least one quiz question.
///
/// # Examples
///
/// ```
/// use curso_core::{CourseBuilder, CourseModule, QuizQuestion};
///
/// let module = CourseModule::new("Intro", "**Hola**", "sunrise", vec![], None).unwrap();
/// let question = QuizQuestion::new("¿Sí?", vec!["Sí".into(), "No".into()], 0).unwrap();
///
/// let course = CourseBuilder::default()
///     .title("Curso")
///     .modules(vec![module])
///     .quiz(vec![question])
///     .build()
///     .unwrap();
/// assert_eq!(course.modules().len(), 1);
/// assert!(course.sources().is_empty());
///
/// assert!(CourseBuilder::default().title("Vacío").build().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Getters, derive_builder::Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Course title
    title: String,
    /// Tagline
    #[builder(default)]
    subtitle: String,
    /// Lessons in order
    modules: Vec<CourseModule>,
    /// Values for the data tab
    #[builder(default)]
    chart_data: Vec<ChartDataPoint>,
    /// Caption of the chart
    #[builder(default)]
    chart_title: String,
    /// Final quiz
    quiz: Vec<QuizQuestion>,
    /// Citation URLs from grounding
    #[builder(default)]
    sources: Vec<String>,
}

impl Course {
    /// Returns a builder for constructing a Course.
    pub fn builder() -> CourseBuilder {
        CourseBuilder::default()
    }
}

impl CourseBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("course has an empty title".to_string());
        }
        if let Some(modules) = &self.modules
            && modules.is_empty()
        {
            return Err("course has no modules".to_string());
        }
        if let Some(quiz) = &self.quiz
            && quiz.is_empty()
        {
            return Err("course has no quiz questions".to_string());
        }
        Ok(())
    }
}
