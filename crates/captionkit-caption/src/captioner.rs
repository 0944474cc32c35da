//! Captioner backend trait and the fallback implementation.
//!
//! The `CaptionerBackend` trait abstracts over caption generation. Callers
//! construct one explicitly and hand it to the annotator by reference.

use std::path::Path;

use crate::types::{file_name, CaptionOutcome};

/// Trait for caption generation backends.
pub trait CaptionerBackend: Send + Sync {
    /// Generate captions for an image. Failures are reported in the
    /// outcome rather than as an error.
    fn generate(&self, image_path: &Path) -> CaptionOutcome;

    /// Generate captions for several images, one outcome per input.
    fn generate_batch(&self, image_paths: &[&Path]) -> Vec<CaptionOutcome> {
        image_paths.iter().map(|p| self.generate(p)).collect()
    }

    /// Model name reported in record metadata.
    fn model_name(&self) -> &str;

    /// Device the model runs on.
    fn device(&self) -> &str;

    /// Check if the backend can produce captions.
    fn is_available(&self) -> bool;
}

/// Placeholder captioner that fails every request.
pub struct NoopCaptioner {
    model: String,
    device: String,
}

impl NoopCaptioner {
    pub fn new(model: &str, device: &str) -> Self {
        Self {
            model: model.to_string(),
            device: device.to_string(),
        }
    }
}

impl CaptionerBackend for NoopCaptioner {
    fn generate(&self, image_path: &Path) -> CaptionOutcome {
        CaptionOutcome::failed(file_name(image_path), "no caption model loaded")
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn device(&self) -> &str {
        &self.device
    }

    fn is_available(&self) -> bool {
        false
    }
}
