//! Structured-output schemas for the three wizard requests.
//!
//! Uses the OpenAPI subset the Gemini API accepts in `responseSchema`.

use serde_json::{Value, json};

fn quiz_question(with_explanation: bool) -> Value {
    let mut properties = json!({
        "question": { "type": "STRING" },
        "options": { "type": "ARRAY", "items": { "type": "STRING" } },
        "correctAnswerIndex": { "type": "INTEGER" }
    });
    if with_explanation {
        properties["explanation"] = json!({ "type": "STRING" });
    }
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": ["question", "options", "correctAnswerIndex"]
    })
}

/// Schema for `{ "pillars": [{ title, description }] }`.
pub fn pillars_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "pillars": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" }
                    },
                    "required": ["title", "description"]
                }
            }
        },
        "required": ["pillars"]
    })
}

/// Schema for `{ "variations": [{ title, focus }] }`.
pub fn variations_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "variations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "focus": { "type": "STRING" }
                    },
                    "required": ["title", "focus"]
                }
            }
        },
        "required": ["variations"]
    })
}

/// Schema for the full course.
pub fn course_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "subtitle": { "type": "STRING" },
            "modules": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "content": { "type": "STRING" },
                        "imageKeyword": { "type": "STRING" },
                        "keyPoints": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "miniQuiz": quiz_question(true)
                    },
                    "required": ["title", "content", "imageKeyword"]
                }
            },
            "chartData": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "label": { "type": "STRING" },
                        "value": { "type": "NUMBER" }
                    },
                    "required": ["label", "value"]
                }
            },
            "chartTitle": { "type": "STRING" },
            "quiz": { "type": "ARRAY", "items": quiz_question(false) }
        },
        "required": ["title", "subtitle", "modules", "chartData", "chartTitle", "quiz"]
    })
}
