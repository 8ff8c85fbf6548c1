//! Type conversions between Curso and Gemini formats.

use super::dto::{
    Content, GeminiRequest, GeminiResponse, GenerationConfig, GoogleSearch, ImageConfigDto,
    Part, Tool,
};
use curso_core::{GenerateRequest, GenerateResponse, InlineImage};

/// Converts a Curso GenerateRequest to the Gemini request body.
pub fn to_gemini_request(req: &GenerateRequest) -> GeminiRequest {
    let contents = vec![Content {
        role: Some("user".to_string()),
        parts: vec![Part {
            text: Some(req.prompt().clone()),
            ..Part::default()
        }],
    }];

    let system_instruction = req.system_instruction().as_ref().map(|text| Content {
        role: None,
        parts: vec![Part {
            text: Some(text.clone()),
            ..Part::default()
        }],
    });

    let tools = if *req.grounding() {
        vec![Tool {
            google_search: GoogleSearch::default(),
        }]
    } else {
        Vec::new()
    };

    let mut config = GenerationConfig::default();
    if let Some(schema) = req.response_schema() {
        config.response_mime_type = Some("application/json".to_string());
        config.response_schema = Some(schema.clone());
    }
    if let Some(image) = req.image_config() {
        config.response_modalities = vec!["IMAGE".to_string()];
        config.image_config = Some(ImageConfigDto {
            image_size: image.image_size().to_string(),
            aspect_ratio: image.aspect_ratio().clone(),
        });
    }
    let generation_config = (config.response_schema.is_some() || config.image_config.is_some())
        .then_some(config);

    GeminiRequest {
        contents,
        system_instruction,
        tools,
        generation_config,
    }
}

/// Converts a Gemini response body to a Curso GenerateResponse.
///
/// Only the first candidate is read. Text parts are concatenated; reasoning
/// parts are skipped.
pub fn from_gemini_response(response: GeminiResponse) -> GenerateResponse {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return GenerateResponse::default();
    };

    let mut text = String::new();
    let mut images = Vec::new();
    for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
        if part.thought == Some(true) {
            continue;
        }
        if let Some(t) = part.text {
            text.push_str(&t);
        }
        if let Some(data) = part.inline_data {
            images.push(InlineImage::new(data.mime_type, data.data));
        }
    }

    GenerateResponse {
        text: (!text.is_empty()).then_some(text),
        images,
        grounding_metadata: candidate.grounding_metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curso_core::{ImageConfig, ImageSize};
    use serde_json::json;

    #[test]
    fn test_grounded_request_has_search_tool_and_no_schema() {
        let req = GenerateRequest::new("prompt")
            .with_system_instruction("system")
            .with_grounding(true);

        let body = serde_json::to_value(to_gemini_request(&req)).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "prompt");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "system");
        assert_eq!(body["tools"], json!([{ "googleSearch": {} }]));
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_schema_request_sets_json_mime_type() {
        let schema = json!({ "type": "OBJECT" });
        let req = GenerateRequest::new("prompt").with_response_schema(schema.clone());

        let body = serde_json::to_value(to_gemini_request(&req)).unwrap();

        assert!(body.get("tools").is_none());
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn test_image_request_sets_image_config() {
        let req = GenerateRequest::new("draw")
            .with_image_config(ImageConfig::new(ImageSize::TwoK, "16:9"));

        let body = serde_json::to_value(to_gemini_request(&req)).unwrap();

        assert_eq!(body["generationConfig"]["imageConfig"]["imageSize"], "2K");
        assert_eq!(body["generationConfig"]["imageConfig"]["aspectRatio"], "16:9");
        assert_eq!(body["generationConfig"]["responseModalities"], json!(["IMAGE"]));
    }

    #[test]
    fn test_response_concatenates_text_and_keeps_metadata() {
        let raw = json!({
            "candidates": [{
                "content": { "role": "model", "parts": [
                    { "text": "thinking...", "thought": true },
                    { "text": "{\"a\":" },
                    { "text": "1}" },
                    { "inlineData": { "mimeType": "image/png", "data": "AAAA" } }
                ]},
                "groundingMetadata": { "groundingChunks": [] }
            }]
        });
        let response: GeminiResponse = serde_json::from_value(raw).unwrap();

        let converted = from_gemini_response(response);

        assert_eq!(converted.text.as_deref(), Some("{\"a\":1}"));
        assert_eq!(converted.images.len(), 1);
        assert_eq!(converted.images[0].data_uri(), "data:image/png;base64,AAAA");
        assert!(converted.grounding_metadata.is_some());
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GeminiResponse = serde_json::from_value(json!({})).unwrap();
        let converted = from_gemini_response(response);
        assert!(converted.text.is_none());
        assert!(converted.images.is_empty());
    }
}
