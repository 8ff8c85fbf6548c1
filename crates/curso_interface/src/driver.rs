//! The generation driver trait.

use async_trait::async_trait;
use curso_core::{GenerateRequest, GenerateResponse};
use curso_error::CursoResult;
use std::sync::Arc;

/// A request/response generative service.
///
/// Each call is independent: implementations must not depend on the result of
/// an earlier call.
#[async_trait]
pub trait GenerationDriver: Send + Sync {
    /// Send one request and wait for the complete response.
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the service cannot be reached or answers
    /// with a failure status.
    async fn generate(&self, req: &GenerateRequest) -> CursoResult<GenerateResponse>;

    /// Provider name for logging.
    fn provider_name(&self) -> &'static str;

    /// Model used when a request does not name one.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<D> GenerationDriver for Arc<D>
where
    D: GenerationDriver + ?Sized,
{
    async fn generate(&self, req: &GenerateRequest) -> CursoResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
