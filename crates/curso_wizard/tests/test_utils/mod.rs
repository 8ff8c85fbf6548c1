//! Test utilities for wizard tests.

use async_trait::async_trait;
use curso_content::{ContentRequestor, RequestPolicy};
use curso_core::{GenerateRequest, GenerateResponse};
use curso_error::{CursoResult, UpstreamError, UpstreamErrorKind};
use curso_interface::GenerationDriver;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Driver answering each call with the next scripted text.
pub struct ScriptedDriver {
    replies: Mutex<VecDeque<String>>,
}

#[async_trait]
impl GenerationDriver for ScriptedDriver {
    async fn generate(&self, _req: &GenerateRequest) -> CursoResult<GenerateResponse> {
        let next = self.replies.lock().expect("replies lock").pop_front();
        match next {
            Some(text) => Ok(GenerateResponse::from_text(text)),
            None => Err(UpstreamError::new(UpstreamErrorKind::HttpStatus {
                status_code: 400,
                message: "script exhausted".to_string(),
            })
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

/// Requestor whose driver replies with `replies` in order.
pub fn requestor(replies: Vec<String>) -> ContentRequestor<Arc<ScriptedDriver>> {
    let driver = Arc::new(ScriptedDriver {
        replies: Mutex::new(replies.into()),
    });
    ContentRequestor::new(driver)
        .with_policy(RequestPolicy::new(Duration::from_secs(1), Duration::from_millis(1)))
}

/// Pillars payload.
#[allow(dead_code)]
pub fn pillars_json(titles: &[&str]) -> String {
    let pillars: Vec<Value> = titles
        .iter()
        .map(|t| json!({ "title": t, "description": "desc" }))
        .collect();
    json!({ "pillars": pillars }).to_string()
}

/// Variations payload.
#[allow(dead_code)]
pub fn variations_json(titles: &[&str]) -> String {
    let variations: Vec<Value> = titles
        .iter()
        .map(|t| json!({ "title": t, "focus": "Práctico" }))
        .collect();
    json!({ "variations": variations }).to_string()
}

/// Course payload whose modules are named after `module_titles`.
#[allow(dead_code)]
pub fn course_json(title: &str, module_titles: &[&str]) -> String {
    let modules: Vec<Value> = module_titles
        .iter()
        .map(|t| json!({ "title": t, "content": "**Idea** clave", "imageKeyword": "idea", "keyPoints": ["a"] }))
        .collect();
    json!({
        "title": title,
        "subtitle": "sub",
        "modules": modules,
        "chartData": [ { "label": "x", "value": 1 } ],
        "chartTitle": "t",
        "quiz": [
            { "question": "q1", "options": ["a", "b"], "correctAnswerIndex": 0 },
            { "question": "q2", "options": ["a", "b"], "correctAnswerIndex": 1 },
            { "question": "q3", "options": ["a", "b", "c"], "correctAnswerIndex": 2 }
        ]
    })
    .to_string()
}
