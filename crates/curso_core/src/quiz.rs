//! Quiz questions with a checked answer index.

use curso_error::PayloadError;
use derive_getters::Getters;
use serde::Serialize;

/// Position of an option inside one [`QuizQuestion`].
///
/// Only obtainable through [`QuizQuestion::option`] or validation, so a value
/// always points at an existing option of the question it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct OptionIndex(usize);

impl OptionIndex {
    /// Zero-based position of the option.
    pub fn get(self) -> usize {
        self.0
    }
}

/// A multiple-choice question whose correct answer is known to be in range.
///
/// # Examples
///
/// ```
/// use curso_core::QuizQuestion;
///
/// let q = QuizQuestion::new("2 + 2?", vec!["3".into(), "4".into()], 1).unwrap();
/// let answer = q.option(1).unwrap();
/// assert!(q.is_correct(answer));
/// assert!(q.option(2).is_none());
///
/// assert!(QuizQuestion::new("2 + 2?", vec!["3".into(), "4".into()], 2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// Question text
    question: String,
    /// Answer options in display order
    options: Vec<String>,
    /// Index of the correct option
    correct_answer_index: OptionIndex,
}

impl QuizQuestion {
    /// Validate and build a question.
    ///
    /// The answer index arrives as a signed integer because that is what a
    /// model may emit; anything outside `0..options.len()` is rejected.
    #[track_caller]
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct_answer_index: i64,
    ) -> Result<Self, PayloadError> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(PayloadError::invalid("quiz question has no text"));
        }
        if options.len() < 2 {
            return Err(PayloadError::invalid(format!(
                "quiz question '{}' has {} option(s), need at least 2",
                question,
                options.len()
            )));
        }
        if options.iter().any(|o| o.trim().is_empty()) {
            return Err(PayloadError::invalid(format!(
                "quiz question '{}' has an empty option",
                question
            )));
        }
        let index = usize::try_from(correct_answer_index)
            .ok()
            .filter(|i| *i < options.len())
            .ok_or_else(|| {
                PayloadError::invalid(format!(
                    "quiz question '{}' has answer index {} outside 0..{}",
                    question,
                    correct_answer_index,
                    options.len()
                ))
            })?;

        Ok(Self {
            question,
            options,
            correct_answer_index: OptionIndex(index),
        })
    }

    /// Checked handle for option `index` of this question.
    pub fn option(&self, index: usize) -> Option<OptionIndex> {
        (index < self.options.len()).then_some(OptionIndex(index))
    }

    /// Whether `answer` is the correct option.
    pub fn is_correct(&self, answer: OptionIndex) -> bool {
        answer == self.correct_answer_index
    }
}
