//! Scripted generation driver.

use async_trait::async_trait;
use curso_core::{GenerateRequest, GenerateResponse, InlineImage};
use curso_error::{CursoError, CursoResult, UpstreamError, UpstreamErrorKind};
use curso_interface::GenerationDriver;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// One scripted reply.
#[allow(dead_code)]
pub enum MockResponse {
    /// Plain response
    Reply(GenerateResponse),
    /// Failure
    Fail(CursoError),
    /// Reply after a delay
    Slow(Duration, GenerateResponse),
}

#[allow(dead_code)]
impl MockResponse {
    /// Text reply without sources.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Reply(GenerateResponse::from_text(text))
    }

    /// Text reply with grounding metadata.
    pub fn grounded(text: impl Into<String>, metadata: serde_json::Value) -> Self {
        Self::Reply(GenerateResponse::from_text(text).with_grounding_metadata(metadata))
    }

    /// Image reply.
    pub fn image(mime_type: &str, data: &str) -> Self {
        Self::Reply(GenerateResponse {
            images: vec![InlineImage::new(mime_type, data)],
            ..GenerateResponse::default()
        })
    }

    /// Upstream failure of the given kind.
    pub fn upstream(kind: UpstreamErrorKind) -> Self {
        Self::Fail(UpstreamError::new(kind).into())
    }

    /// HTTP failure with `status_code`.
    pub fn status(status_code: u16) -> Self {
        Self::upstream(UpstreamErrorKind::HttpStatus {
            status_code,
            message: "scripted".to_string(),
        })
    }
}

/// Driver replaying a script and recording every request.
pub struct MockDriver {
    script: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

#[allow(dead_code)]
impl MockDriver {
    /// Driver that answers with `script` in order.
    pub fn new(script: Vec<MockResponse>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }
}

#[async_trait]
impl GenerationDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> CursoResult<GenerateResponse> {
        self.requests.lock().expect("requests lock").push(req.clone());
        let next = self.script.lock().expect("script lock").pop_front();

        match next {
            Some(MockResponse::Reply(response)) => Ok(response),
            Some(MockResponse::Fail(error)) => Err(error),
            Some(MockResponse::Slow(delay, response)) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
            None => Err(UpstreamError::new(UpstreamErrorKind::HttpStatus {
                status_code: 400,
                message: "script exhausted".to_string(),
            })
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
