//! Generative service integrations for Curso.
//!
//! Currently a single provider: the Gemini `generateContent` REST endpoint.

mod gemini;

pub use gemini::{GeminiClient, GeminiRequest, GeminiResponse};
