//! Request and response types exchanged with the generative service.

use crate::ImageSize;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Image output settings for image-capable models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ImageConfig {
    /// Resolution tier
    image_size: ImageSize,
    /// Aspect ratio such as `16:9`
    aspect_ratio: String,
}

impl ImageConfig {
    /// Create an image configuration.
    pub fn new(image_size: ImageSize, aspect_ratio: impl Into<String>) -> Self {
        Self {
            image_size,
            aspect_ratio: aspect_ratio.into(),
        }
    }
}

/// A single-prompt generation request.
///
/// # Examples
///
/// ```
/// use curso_core::GenerateRequest;
///
/// let req = GenerateRequest::new("Genera 10 pilares")
///     .with_system_instruction("Responde en JSON")
///     .with_grounding(true);
///
/// assert!(*req.grounding());
/// assert!(req.model().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct GenerateRequest {
    /// Model override; the driver's default model is used when absent
    model: Option<String>,
    /// User prompt
    prompt: String,
    /// System instruction
    system_instruction: Option<String>,
    /// Whether the service may ground the answer with web search
    grounding: bool,
    /// JSON schema the response must follow
    response_schema: Option<serde_json::Value>,
    /// Image output settings
    image_config: Option<ImageConfig>,
}

impl GenerateRequest {
    /// Create a plain text request.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            model: None,
            prompt: prompt.into(),
            system_instruction: None,
            grounding: false,
            response_schema: None,
            image_config: None,
        }
    }

    /// Target a specific model instead of the driver default.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Attach a system instruction.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Enable or disable web-search grounding.
    pub fn with_grounding(mut self, grounding: bool) -> Self {
        self.grounding = grounding;
        self
    }

    /// Ask for JSON output following `schema`.
    pub fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    /// Ask for image output.
    pub fn with_image_config(mut self, config: ImageConfig) -> Self {
        self.image_config = Some(config);
        self
    }
}

/// Inline binary part of a response, still base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct InlineImage {
    /// MIME type reported by the service
    mime_type: String,
    /// Base64 payload
    data: String,
}

impl InlineImage {
    /// Wrap an inline payload.
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Render as a `data:` URI.
    ///
    /// # Examples
    ///
    /// ```
    /// use curso_core::InlineImage;
    ///
    /// let img = InlineImage::new("image/png", "iVBORw0KGgo=");
    /// assert_eq!(img.data_uri(), "data:image/png;base64,iVBORw0KGgo=");
    /// ```
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// What the service returned for one request.
///
/// `grounding_metadata` is kept as raw JSON because its shape is optional and
/// loosely specified; callers read it defensively.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Concatenated text parts, if any
    pub text: Option<String>,
    /// Inline images in response order
    pub images: Vec<InlineImage>,
    /// Grounding metadata of the first candidate
    pub grounding_metadata: Option<serde_json::Value>,
}

impl GenerateResponse {
    /// Response consisting of text only.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Attach grounding metadata.
    pub fn with_grounding_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.grounding_metadata = Some(metadata);
        self
    }

    /// Text, treating whitespace-only text as absent.
    pub fn usable_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }
}
