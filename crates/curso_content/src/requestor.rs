//! The content requests behind each wizard step.

use crate::image::first_image_uri;
use crate::normalize::{extract_sources, parse_structured_payload};
use crate::payload::{CoursePayload, PillarsPayload, VariationsPayload};
use crate::policy::RequestPolicy;
use crate::{prompts, schema};
use curso_core::{
    Course, GenerateRequest, ImageConfig, ImageSize, PillarSet, VariationSet,
};
use curso_error::{CursoResult, InputError, UpstreamError, UpstreamErrorKind};
use curso_interface::GenerationDriver;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Number of pillars and variations asked for, and the most kept.
pub const CHOICES_PER_REQUEST: usize = 10;

/// Default model for module images.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-3-pro-image-preview";

/// A wizard request waiting to be sent, with the context it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingRequest {
    /// Pillars for a topic
    Pillars {
        /// Course topic
        topic: String,
    },
    /// Variations for a pillar
    Variations {
        /// Course topic
        topic: String,
        /// Chosen pillar
        pillar_title: String,
    },
    /// The full course
    Course {
        /// Course topic
        topic: String,
        /// Chosen pillar
        pillar_title: String,
        /// Chosen lesson variation
        variation_title: String,
    },
}

impl PendingRequest {
    /// Short name for logs.
    pub fn step_name(&self) -> &'static str {
        match self {
            PendingRequest::Pillars { .. } => "pillars",
            PendingRequest::Variations { .. } => "variations",
            PendingRequest::Course { .. } => "course",
        }
    }
}

/// The successful result of a [`PendingRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Pillar choices
    Pillars(PillarSet),
    /// Variation choices
    Variations(VariationSet),
    /// Finished course
    Course(Course),
}

/// Sends wizard requests through a [`GenerationDriver`] and validates the replies.
///
/// Every operation is independent: the requestor keeps no state between calls.
///
/// # Examples
///
/// ```no_run
/// use curso_content::ContentRequestor;
/// use curso_models::GeminiClient;
/// use std::time::Duration;
///
/// # async fn demo() -> curso_error::CursoResult<()> {
/// let client = GeminiClient::new(
///     std::env::var("GEMINI_API_KEY").unwrap_or_default(),
///     "gemini-2.5-flash".to_string(),
///     Duration::from_secs(90),
/// )?;
/// let requestor = ContentRequestor::new(client);
/// let set = requestor.request_pillars("Fotografía nocturna").await?;
/// println!("{} pillars", set.pillars().len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ContentRequestor<D> {
    driver: D,
    policy: RequestPolicy,
    image_model: String,
    grounding: bool,
}

impl<D: GenerationDriver> ContentRequestor<D> {
    /// Requestor with the default policy, web grounding on.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            policy: RequestPolicy::default(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            grounding: true,
        }
    }

    /// Replace the timeout and retry policy.
    pub fn with_policy(mut self, policy: RequestPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Model used for module images.
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    /// Toggle web grounding.
    ///
    /// Grounded requests cannot carry a response schema, so with grounding on
    /// the reply is free text that goes through JSON recovery; with it off
    /// the service is asked for schema-constrained JSON and returns no sources.
    pub fn with_grounding(mut self, grounding: bool) -> Self {
        self.grounding = grounding;
        self
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The active policy.
    pub fn policy(&self) -> &RequestPolicy {
        &self.policy
    }

    fn text_request(&self, prompt: String, system: &str, schema: Value) -> GenerateRequest {
        let request = GenerateRequest::new(prompt).with_system_instruction(system);
        if self.grounding {
            request.with_grounding(true)
        } else {
            request.with_response_schema(schema)
        }
    }

    async fn generate_text(
        &self,
        operation: &'static str,
        request: GenerateRequest,
    ) -> CursoResult<(String, Vec<String>)> {
        let response = self
            .policy
            .run(operation, || self.driver.generate(&request))
            .await?;

        let Some(text) = response.usable_text() else {
            warn!(operation, "Service returned no text");
            return Err(UpstreamError::new(UpstreamErrorKind::EmptyResponse).into());
        };
        let sources = extract_sources(&response);
        debug!(operation, text_len = text.len(), sources = sources.len(), "Received text");
        Ok((text.to_string(), sources))
    }

    /// Ask for up to ten pillars for `topic`.
    ///
    /// # Errors
    ///
    /// Input error for a blank topic, upstream error when the call fails or
    /// yields no text, payload error when the reply cannot be decoded or
    /// contains no valid pillar.
    #[instrument(skip(self), fields(provider = self.driver.provider_name(), grounding = self.grounding))]
    pub async fn request_pillars(&self, topic: &str) -> CursoResult<PillarSet> {
        let topic = non_blank("topic", topic)?;
        let request = self.text_request(
            prompts::pillars_prompt(topic, CHOICES_PER_REQUEST),
            prompts::PILLARS_SYSTEM,
            schema::pillars_schema(),
        );

        let (text, sources) = self.generate_text("pillars", request).await?;
        let pillars =
            parse_structured_payload::<PillarsPayload>(&text)?.into_pillars(CHOICES_PER_REQUEST)?;

        info!(count = pillars.len(), sources = sources.len(), "Pillars ready");
        Ok(PillarSet::new(pillars, sources))
    }

    /// Ask for up to ten lesson variations of `pillar_title`.
    #[instrument(skip(self), fields(provider = self.driver.provider_name(), grounding = self.grounding))]
    pub async fn request_variations(
        &self,
        topic: &str,
        pillar_title: &str,
    ) -> CursoResult<VariationSet> {
        let topic = non_blank("topic", topic)?;
        let pillar_title = non_blank("pillar", pillar_title)?;
        let request = self.text_request(
            prompts::variations_prompt(topic, pillar_title, CHOICES_PER_REQUEST),
            prompts::VARIATIONS_SYSTEM,
            schema::variations_schema(),
        );

        let (text, sources) = self.generate_text("variations", request).await?;
        let variations = parse_structured_payload::<VariationsPayload>(&text)?
            .into_variations(CHOICES_PER_REQUEST)?;

        info!(count = variations.len(), sources = sources.len(), "Variations ready");
        Ok(VariationSet::new(variations, sources))
    }

    /// Ask for the complete course.
    #[instrument(skip(self), fields(provider = self.driver.provider_name(), grounding = self.grounding))]
    pub async fn request_course(
        &self,
        topic: &str,
        pillar_title: &str,
        variation_title: &str,
    ) -> CursoResult<Course> {
        let topic = non_blank("topic", topic)?;
        let pillar_title = non_blank("pillar", pillar_title)?;
        let variation_title = non_blank("variation", variation_title)?;
        let request = self.text_request(
            prompts::course_prompt(topic, pillar_title, variation_title),
            prompts::COURSE_SYSTEM,
            schema::course_schema(),
        );

        let (text, sources) = self.generate_text("course", request).await?;
        let course = parse_structured_payload::<CoursePayload>(&text)?.into_course(sources)?;

        info!(
            title = %course.title(),
            modules = course.modules().len(),
            questions = course.quiz().len(),
            "Course ready"
        );
        Ok(course)
    }

    /// Generate a header image for a module.
    ///
    /// Returns a `data:` URI, or `None` when anything goes wrong. Failures are
    /// logged and never surfaced.
    #[instrument(skip(self), fields(model = %self.image_model))]
    pub async fn request_module_image(
        &self,
        title: &str,
        keyword: &str,
        size: ImageSize,
    ) -> Option<String> {
        let request = GenerateRequest::new(prompts::image_prompt(title, keyword))
            .with_model(self.image_model.clone())
            .with_image_config(ImageConfig::new(size, prompts::IMAGE_ASPECT_RATIO));

        let response = match self
            .policy
            .run("module_image", || self.driver.generate(&request))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Image request failed");
                return None;
            }
        };

        match first_image_uri(&response) {
            Ok(uri) => {
                debug!(uri_len = uri.len(), "Image ready");
                Some(uri)
            }
            Err(e) => {
                warn!(error = %e, "Image response unusable");
                None
            }
        }
    }

    /// Run a wizard request.
    #[instrument(skip(self, pending), fields(step = pending.step_name()))]
    pub async fn fulfil(&self, pending: &PendingRequest) -> CursoResult<StepOutcome> {
        match pending {
            PendingRequest::Pillars { topic } => {
                self.request_pillars(topic).await.map(StepOutcome::Pillars)
            }
            PendingRequest::Variations {
                topic,
                pillar_title,
            } => self
                .request_variations(topic, pillar_title)
                .await
                .map(StepOutcome::Variations),
            PendingRequest::Course {
                topic,
                pillar_title,
                variation_title,
            } => self
                .request_course(topic, pillar_title, variation_title)
                .await
                .map(StepOutcome::Course),
        }
    }
}

#[track_caller]
fn non_blank<'a>(what: &str, value: &'a str) -> Result<&'a str, InputError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InputError::new(format!("{} must not be empty", what)));
    }
    Ok(trimmed)
}
