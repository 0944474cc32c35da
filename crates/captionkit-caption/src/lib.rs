//! CaptionKit Caption — boundary with the caption generation service.
//!
//! Provides the `CaptionerBackend` trait that hands caption results to the
//! annotation pipeline. `ManifestCaptioner` serves precomputed results from
//! a JSON manifest. Without one, `NoopCaptioner` is used and every image is
//! reported as a failure.

pub mod captioner;
pub mod manifest;
pub mod types;

pub use captioner::{CaptionerBackend, NoopCaptioner};
pub use manifest::{ManifestCaptioner, ManifestEntry};
pub use types::{file_name, CaptionBatch, CaptionOutcome, CaptionVariant, ImageProperties};

use std::path::Path;
use std::sync::Arc;

/// Create the best available captioner.
///
/// Tries the manifest first (if a path is given and it loads),
/// falls back to NoopCaptioner.
pub fn create_captioner(
    manifest: Option<&Path>,
    model: &str,
    device: &str,
) -> Arc<dyn CaptionerBackend> {
    if let Some(path) = manifest {
        match ManifestCaptioner::load(path, model, device) {
            Ok(captioner) => {
                tracing::info!(
                    "Using caption manifest {} ({} entries)",
                    path.display(),
                    captioner.len()
                );
                return Arc::new(captioner);
            }
            Err(e) => {
                tracing::warn!(
                    "Caption manifest unavailable: {}. No captions will be generated.",
                    e
                );
            }
        }
    } else {
        tracing::info!("No caption manifest configured. No captions will be generated.");
    }

    Arc::new(NoopCaptioner::new(model, device))
}
