//! Test utilities for content request tests.
//!
//! Provides a scripted driver and canned payloads.

pub mod mock_driver;

#[allow(unused_imports)]
pub use mock_driver::{MockDriver, MockResponse};

use serde_json::{Value, json};

/// A pillars payload with `count` entries.
#[allow(dead_code)]
pub fn pillars_json(count: usize) -> String {
    let pillars: Vec<Value> = (0..count)
        .map(|i| json!({ "title": format!("Pilar {}", i), "description": format!("Descripción {}", i) }))
        .collect();
    json!({ "pillars": pillars }).to_string()
}

/// A variations payload with `count` entries.
#[allow(dead_code)]
pub fn variations_json(count: usize) -> String {
    let variations: Vec<Value> = (0..count)
        .map(|i| json!({ "title": format!("Lección {}", i), "focus": "Práctico" }))
        .collect();
    json!({ "variations": variations }).to_string()
}

/// A valid two-module course payload.
#[allow(dead_code)]
pub fn course_value() -> Value {
    json!({
        "title": "Huerto urbano",
        "subtitle": "Cultiva en tu balcón",
        "modules": [
            {
                "title": "Sustratos",
                "content": "El **sustrato** lo es todo.\nRiega poco.",
                "imageKeyword": "soil",
                "keyPoints": ["Drenaje", "Nutrientes", "pH"],
                "miniQuiz": {
                    "question": "¿Qué importa más?",
                    "options": ["Drenaje", "Color de la maceta"],
                    "correctAnswerIndex": 0,
                    "explanation": "Sin drenaje las raíces se pudren."
                }
            },
            {
                "title": "Riego",
                "content": "Mejor por la mañana.",
                "imageKeyword": "watering can",
                "keyPoints": ["Mañana", "Goteo"]
            }
        ],
        "chartData": [
            { "label": "Tomate", "value": 8 },
            { "label": "Lechuga", "value": 3.5 }
        ],
        "chartTitle": "Kg por m² al año",
        "quiz": [
            { "question": "¿Cuándo regar?", "options": ["Mañana", "Mediodía", "Noche"], "correctAnswerIndex": 0 },
            { "question": "¿Qué evita el encharcamiento?", "options": ["Drenaje", "Sombra"], "correctAnswerIndex": 0 },
            { "question": "¿Rinde más?", "options": ["Lechuga", "Tomate"], "correctAnswerIndex": 1 }
        ]
    })
}

/// Grounding metadata citing `urls` in order.
#[allow(dead_code)]
pub fn grounding(urls: &[&str]) -> Value {
    let chunks: Vec<Value> = urls
        .iter()
        .map(|u| json!({ "web": { "uri": u, "title": "fuente" } }))
        .collect();
    json!({ "groundingChunks": chunks })
}
