use crate::{
    error::Result,
    models::{GeneratedImage, GenerationRequest, GenerationResult},
};
use async_trait::async_trait;

/// Fixed instructional text prepended to every surfaced failure.
pub const REMOTE_FAILURE_PREAMBLE: &str = "An error occurred calling the image generation API.
  1. Check whether the response was blocked as a policy violation.
  2. Try a different prompt to see if that was the problem.";

/// The remote image-generation capability. Implemented by the Vertex
/// client and by test stubs, so the adapter needs no UI or network harness.
#[async_trait]
pub trait ImageGeneration: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<GeneratedImage>>;
}

/// Runs one generation call and folds any failure into the result. Images
/// come back in the order the remote capability produced them; every error
/// surfaces as the fixed preamble plus the raw diagnostic, never as a
/// propagated error. No retry, no partial results.
pub async fn invoke(
    backend: &dyn ImageGeneration,
    request: &GenerationRequest,
) -> GenerationResult {
    match backend.generate(request).await {
        Ok(images) => GenerationResult::Images(images),
        Err(e) => {
            log::error!("Image generation failed: {}", e);
            GenerationResult::Failed(format!("{}\n{}", REMOTE_FAILURE_PREAMBLE, e))
        }
    }
}
