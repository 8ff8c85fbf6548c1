//! Gemini REST client.
//!
//! Talks to `models/{model}:generateContent` with an API key header. Grounding
//! maps to the `googleSearch` tool, structured output to `responseSchema`, and
//! image output to `imageConfig`.

mod client;
mod conversions;
mod dto;

pub use client::GeminiClient;
pub use dto::{GeminiRequest, GeminiResponse};
