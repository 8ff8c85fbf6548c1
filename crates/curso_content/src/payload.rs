//! Wire records as the model emits them, and their validation into domain types.
//!
//! Field names are camelCase because that is the shape the prompts and
//! schemas ask for. Nothing here is trusted: every record passes through the
//! validating constructors of `curso_core` before it reaches the wizard.

use curso_core::{
    ChartDataPoint, Course, CourseModule, LessonVariation, MiniQuiz, Pillar, QuizQuestion,
};
use curso_error::PayloadError;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// `{ "pillars": [...] }`
#[derive(Debug, Clone, Deserialize)]
pub struct PillarsPayload {
    /// Proposed pillars
    pub pillars: Vec<PillarRecord>,
}

/// One pillar as emitted.
#[derive(Debug, Clone, Deserialize)]
pub struct PillarRecord {
    /// Title
    pub title: String,
    /// Description
    #[serde(default)]
    pub description: String,
}

impl PillarsPayload {
    /// Validate and number at most `limit` pillars.
    pub fn into_pillars(self, limit: usize) -> Result<Vec<Pillar>, PayloadError> {
        if self.pillars.is_empty() {
            return Err(PayloadError::invalid("response contains no pillars"));
        }
        if self.pillars.len() > limit {
            warn!(received = self.pillars.len(), limit, "Truncating extra pillars");
        }
        self.pillars
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, p)| Pillar::new(i, p.title, p.description))
            .collect()
    }
}

/// `{ "variations": [...] }`
#[derive(Debug, Clone, Deserialize)]
pub struct VariationsPayload {
    /// Proposed lesson variations
    pub variations: Vec<VariationRecord>,
}

/// One variation as emitted.
#[derive(Debug, Clone, Deserialize)]
pub struct VariationRecord {
    /// Title
    pub title: String,
    /// Focus
    #[serde(default)]
    pub focus: String,
}

impl VariationsPayload {
    /// Validate and number at most `limit` variations.
    pub fn into_variations(self, limit: usize) -> Result<Vec<LessonVariation>, PayloadError> {
        if self.variations.is_empty() {
            return Err(PayloadError::invalid("response contains no variations"));
        }
        if self.variations.len() > limit {
            warn!(received = self.variations.len(), limit, "Truncating extra variations");
        }
        self.variations
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, v)| LessonVariation::new(i, v.title, v.focus))
            .collect()
    }
}

/// A quiz question as emitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRecord {
    /// Question text
    pub question: String,
    /// Options
    pub options: Vec<String>,
    /// Claimed correct index, unchecked. May arrive as a number or a numeric string.
    pub correct_answer_index: Value,
    /// Explanation (mini-quiz only)
    #[serde(default)]
    pub explanation: Option<String>,
}

impl QuizRecord {
    fn into_question(self) -> Result<QuizQuestion, PayloadError> {
        let index = answer_index(&self.correct_answer_index).ok_or_else(|| {
            PayloadError::invalid(format!(
                "correct answer index for '{}' is not an integer: {}",
                self.question, self.correct_answer_index
            ))
        })?;
        QuizQuestion::new(self.question, self.options, index)
    }
}

/// Integral index from `1`, `1.0`, `"1"` or `" 1.0 "`.
fn answer_index(raw: &Value) -> Option<i64> {
    let integral = |f: f64| (f.is_finite() && f.fract() == 0.0).then_some(f as i64);
    match raw {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

/// A chart point as emitted. The value may arrive as a number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartRecord {
    /// Label
    pub label: String,
    /// Raw value
    pub value: Value,
}

impl ChartRecord {
    fn into_point(self) -> Result<ChartDataPoint, PayloadError> {
        let value = match &self.value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
            _ => None,
        }
        .ok_or_else(|| {
            PayloadError::invalid(format!(
                "chart value for '{}' is not numeric: {}",
                self.label, self.value
            ))
        })?;
        ChartDataPoint::new(self.label, value)
    }
}

/// A module as emitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRecord {
    /// Title
    pub title: String,
    /// Markdown-like body
    #[serde(default)]
    pub content: String,
    /// English image keyword
    #[serde(default)]
    pub image_keyword: String,
    /// Summary bullets
    #[serde(default)]
    pub key_points: Vec<String>,
    /// Review question
    #[serde(default)]
    pub mini_quiz: Option<QuizRecord>,
}

impl ModuleRecord {
    fn into_module(self) -> Result<CourseModule, PayloadError> {
        // Invalid mini-quiz: drop it, keep the module.
        let mini_quiz = self.mini_quiz.and_then(|record| {
            let explanation = record.explanation.clone();
            match record.into_question() {
                Ok(question) => Some(MiniQuiz::new(question, explanation)),
                Err(e) => {
                    warn!(module = %self.title, error = %e, "Dropping invalid mini-quiz");
                    None
                }
            }
        });
        CourseModule::new(
            self.title,
            self.content,
            self.image_keyword,
            self.key_points,
            mini_quiz,
        )
    }
}

/// The full course as emitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePayload {
    /// Title
    pub title: String,
    /// Subtitle
    #[serde(default)]
    pub subtitle: String,
    /// Modules in order
    pub modules: Vec<ModuleRecord>,
    /// Chart values
    #[serde(default)]
    pub chart_data: Vec<ChartRecord>,
    /// Chart caption
    #[serde(default)]
    pub chart_title: String,
    /// Final quiz
    pub quiz: Vec<QuizRecord>,
}

impl CoursePayload {
    /// Validate every part and assemble the course with its sources.
    pub fn into_course(self, sources: Vec<String>) -> Result<Course, PayloadError> {
        let modules = self
            .modules
            .into_iter()
            .map(ModuleRecord::into_module)
            .collect::<Result<Vec<_>, _>>()?;
        let chart_data = self
            .chart_data
            .into_iter()
            .map(ChartRecord::into_point)
            .collect::<Result<Vec<_>, _>>()?;
        let quiz = self
            .quiz
            .into_iter()
            .map(QuizRecord::into_question)
            .collect::<Result<Vec<_>, _>>()?;

        Course::builder()
            .title(self.title)
            .subtitle(self.subtitle)
            .modules(modules)
            .chart_data(chart_data)
            .chart_title(self.chart_title)
            .quiz(quiz)
            .sources(sources)
            .build()
            .map_err(|e| PayloadError::invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn course_json() -> Value {
        json!({
            "title": "Cocina vegana",
            "subtitle": "Del mercado al plato",
            "modules": [
                {
                    "title": "Proteínas vegetales",
                    "content": "Las **legumbres** son clave.",
                    "imageKeyword": "lentils",
                    "keyPoints": ["Legumbres", "Tofu", ""],
                    "miniQuiz": {
                        "question": "¿Fuente de proteína?",
                        "options": ["Lentejas", "Azúcar"],
                        "correctAnswerIndex": 0,
                        "explanation": "Las lentejas tienen ~9 g por 100 g."
                    }
                }
            ],
            "chartData": [ { "label": "2020", "value": 12 }, { "label": "2024", "value": "18.5%" } ],
            "chartTitle": "Mercado vegano (miles de M$)",
            "quiz": [
                { "question": "¿Qué es el tofu?", "options": ["Soja", "Trigo", "Arroz"], "correctAnswerIndex": 0 }
            ]
        })
    }

    fn decode(value: Value) -> Result<Course, PayloadError> {
        serde_json::from_value::<CoursePayload>(value)
            .map_err(|e| PayloadError::malformed(e.to_string()))?
            .into_course(vec!["https://example.org".into()])
    }

    #[test]
    fn test_course_decodes_and_validates() {
        let course = decode(course_json()).unwrap();

        assert_eq!(course.title(), "Cocina vegana");
        assert_eq!(course.modules().len(), 1);
        assert_eq!(course.modules()[0].key_points().len(), 2);
        assert!(course.modules()[0].mini_quiz().is_some());
        assert_eq!(*course.chart_data()[1].value(), 18.5);
        assert_eq!(course.sources(), &vec!["https://example.org".to_string()]);
    }

    #[test]
    fn test_out_of_range_quiz_answer_rejected() {
        let mut value = course_json();
        value["quiz"][0]["correctAnswerIndex"] = json!(3);
        assert!(decode(value).is_err());
    }

    #[test]
    fn test_quiz_index_accepts_string_and_integral_float() {
        let mut value = course_json();
        value["quiz"][0]["correctAnswerIndex"] = json!("1");
        value["modules"][0]["miniQuiz"]["correctAnswerIndex"] = json!(1.0);
        let course = decode(value).unwrap();

        assert_eq!(course.quiz()[0].correct_answer_index().get(), 1);
        let mini = course.modules()[0].mini_quiz().as_ref().unwrap();
        assert_eq!(mini.question().correct_answer_index().get(), 1);
    }

    #[test]
    fn test_quiz_index_rejects_text_and_fractions() {
        let mut value = course_json();
        value["quiz"][0]["correctAnswerIndex"] = json!("abc");
        assert!(decode(value).is_err());

        let mut value = course_json();
        value["quiz"][0]["correctAnswerIndex"] = json!(1.5);
        assert!(decode(value).is_err());

        let mut value = course_json();
        value["modules"][0]["miniQuiz"]["correctAnswerIndex"] = json!("uno");
        assert!(decode(value).unwrap().modules()[0].mini_quiz().is_none());
    }

    #[test]
    fn test_non_numeric_chart_value_rejected() {
        let mut value = course_json();
        value["chartData"][0]["value"] = json!("mucho");
        assert!(decode(value).is_err());
    }

    #[test]
    fn test_empty_module_title_rejected() {
        let mut value = course_json();
        value["modules"][0]["title"] = json!(" ");
        assert!(decode(value).is_err());
    }

    #[test]
    fn test_empty_quiz_rejected() {
        let mut value = course_json();
        value["quiz"] = json!([]);
        assert!(decode(value).is_err());
    }

    #[test]
    fn test_invalid_mini_quiz_dropped() {
        let mut value = course_json();
        value["modules"][0]["miniQuiz"]["correctAnswerIndex"] = json!(-1);
        let course = decode(value).unwrap();
        assert!(course.modules()[0].mini_quiz().is_none());
    }

    #[test]
    fn test_pillars_truncated_and_numbered() {
        let pillars: Vec<Value> = (0..12)
            .map(|i| json!({ "title": format!("Pilar {i}"), "description": "d" }))
            .collect();
        let payload: PillarsPayload = serde_json::from_value(json!({ "pillars": pillars })).unwrap();

        let pillars = payload.into_pillars(10).unwrap();

        assert_eq!(pillars.len(), 10);
        assert_eq!(pillars[0].id(), "pillar-0");
        assert_eq!(pillars[9].id(), "pillar-9");
    }

    #[test]
    fn test_empty_variation_list_rejected() {
        let payload: VariationsPayload =
            serde_json::from_value(json!({ "variations": [] })).unwrap();
        assert!(payload.into_variations(10).is_err());
    }
}
