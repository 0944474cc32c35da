//! Precomputed caption results loaded from a JSON manifest.
//!
//! Manifest format:
//! ```json
//! [
//!   {"filename": "a.jpg", "width": 640, "height": 480, "format": "JPEG",
//!    "captions": [{"type": "standard", "text": "a man running in a park"}]},
//!   {"filename": "b.jpg", "error": "cannot identify image file"}
//! ]
//! ```

use std::collections::HashMap;
use std::path::Path;

use captionkit_core::Result;
use serde::{Deserialize, Serialize};

use crate::captioner::CaptionerBackend;
use crate::types::{
    file_name, CaptionBatch, CaptionOutcome, CaptionVariant, ImageProperties,
    DETAILED_CONFIDENCE, STANDARD_CONFIDENCE,
};

/// A caption as written in the manifest. Confidence may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestCaption {
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    pub text: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

fn default_kind() -> String {
    "standard".to_string()
}

impl ManifestCaption {
    fn into_variant(self) -> CaptionVariant {
        let confidence = self.confidence.unwrap_or(match self.kind.as_str() {
            "detailed" => DETAILED_CONFIDENCE,
            _ => STANDARD_CONFIDENCE,
        });
        CaptionVariant::new(self.kind, self.text, confidence)
    }
}

/// One image entry in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub filename: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub captions: Vec<ManifestCaption>,
    /// Upstream failure message; takes precedence over captions.
    #[serde(default)]
    pub error: Option<String>,
}

impl ManifestEntry {
    /// Convert into a boundary outcome, reporting invalid entries as failures.
    pub fn into_outcome(self) -> CaptionOutcome {
        let filename = file_name(Path::new(&self.filename));

        if let Some(error) = self.error {
            return CaptionOutcome::failed(filename, error);
        }

        let properties = match ImageProperties::new(self.width, self.height, self.format) {
            Ok(p) => p,
            Err(e) => return CaptionOutcome::failed(filename, e),
        };

        if self.captions.is_empty() {
            return CaptionOutcome::failed(filename, "no captions generated");
        }

        CaptionOutcome::Generated(CaptionBatch {
            filename,
            properties,
            captions: self
                .captions
                .into_iter()
                .map(ManifestCaption::into_variant)
                .collect(),
        })
    }
}

/// Captioner serving precomputed results keyed by file basename.
pub struct ManifestCaptioner {
    entries: HashMap<String, ManifestEntry>,
    model: String,
    device: String,
}

impl ManifestCaptioner {
    /// Load a manifest file.
    pub fn load(path: &Path, model: &str, device: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let entries: Vec<ManifestEntry> = serde_json::from_str(&raw)?;
        Ok(Self::from_entries(entries, model, device))
    }

    pub fn from_entries(entries: Vec<ManifestEntry>, model: &str, device: &str) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| (file_name(Path::new(&e.filename)), e))
            .collect();
        Self {
            entries,
            model: model.to_string(),
            device: device.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CaptionerBackend for ManifestCaptioner {
    fn generate(&self, image_path: &Path) -> CaptionOutcome {
        let filename = file_name(image_path);
        match self.entries.get(&filename) {
            Some(entry) => entry.clone().into_outcome(),
            None => CaptionOutcome::failed(filename, "file not found"),
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn device(&self) -> &str {
        &self.device
    }

    fn is_available(&self) -> bool {
        !self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MANIFEST: &str = r#"[
        {"filename": "photos/run.jpg", "width": 800, "height": 600,
         "captions": [
            {"type": "standard", "text": "a man running in a park"},
            {"type": "detailed", "text": "a man in a red shirt running through a green park"}
         ]},
        {"filename": "broken.jpg", "error": "cannot identify image file"},
        {"filename": "empty.png", "width": 10, "height": 10, "captions": []},
        {"filename": "flat.png", "width": 10, "height": 0,
         "captions": [{"text": "a line"}]}
    ]"#;

    fn load() -> ManifestCaptioner {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MANIFEST.as_bytes()).unwrap();
        ManifestCaptioner::load(file.path(), "BLIP-base", "cpu").unwrap()
    }

    #[test]
    fn test_generated_entry() {
        let captioner = load();
        assert_eq!(captioner.len(), 4);
        assert!(captioner.is_available());

        match captioner.generate(Path::new("/tmp/elsewhere/run.jpg")) {
            CaptionOutcome::Generated(batch) => {
                assert_eq!(batch.filename, "run.jpg");
                assert_eq!(batch.properties.format_or_default(), "JPEG");
                assert_eq!(batch.captions.len(), 2);
                assert_eq!(batch.captions[0].confidence, STANDARD_CONFIDENCE);
                assert_eq!(batch.captions[1].confidence, DETAILED_CONFIDENCE);
            }
            other => panic!("expected generated outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_failures() {
        let captioner = load();
        assert_eq!(
            captioner.generate(Path::new("broken.jpg")),
            CaptionOutcome::failed("broken.jpg", "cannot identify image file")
        );
        assert_eq!(
            captioner.generate(Path::new("empty.png")),
            CaptionOutcome::failed("empty.png", "no captions generated")
        );
        assert_eq!(
            captioner.generate(Path::new("missing.jpg")),
            CaptionOutcome::failed("missing.jpg", "file not found")
        );
        assert!(matches!(
            captioner.generate(Path::new("flat.png")),
            CaptionOutcome::Failed { .. }
        ));
    }

    #[test]
    fn test_load_rejects_malformed_manifest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        assert!(ManifestCaptioner::load(file.path(), "m", "cpu").is_err());
    }
}
