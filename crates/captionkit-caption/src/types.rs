//! Records produced by the caption generation service.

use captionkit_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Estimated confidence of the beam-search caption.
pub const STANDARD_CONFIDENCE: f64 = 0.85;
/// Estimated confidence of the sampled, longer caption.
pub const DETAILED_CONFIDENCE: f64 = 0.80;

/// One candidate caption for an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionVariant {
    /// Variant tag (e.g., "standard", "detailed").
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    /// Caller-estimated confidence in [0, 1].
    pub confidence: f64,
}

impl CaptionVariant {
    pub fn new(kind: impl Into<String>, text: impl Into<String>, confidence: f64) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn standard(text: impl Into<String>) -> Self {
        Self::new("standard", text, STANDARD_CONFIDENCE)
    }

    pub fn detailed(text: impl Into<String>) -> Self {
        Self::new("detailed", text, DETAILED_CONFIDENCE)
    }
}

/// Decoded image dimensions and container format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageProperties {
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl ImageProperties {
    /// Validate dimensions. Both must be positive.
    pub fn new(width: u32, height: u32, format: Option<String>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidImage(format!(
                "image dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            format,
        })
    }

    /// Width over height, rounded to two decimals.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        let ratio = self.width as f64 / self.height as f64;
        round_half_even(ratio * 100.0) / 100.0
    }

    /// Container format, defaulting to JPEG when the decoder reported none.
    pub fn format_or_default(&self) -> &str {
        self.format.as_deref().unwrap_or("JPEG")
    }
}

/// Successful caption generation for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionBatch {
    pub filename: String,
    pub properties: ImageProperties,
    pub captions: Vec<CaptionVariant>,
}

impl CaptionBatch {
    /// The caption the annotation pipeline classifies: the first
    /// `standard` variant, otherwise the first variant.
    pub fn primary(&self) -> Option<&CaptionVariant> {
        self.captions
            .iter()
            .find(|c| c.kind == "standard")
            .or_else(|| self.captions.first())
    }
}

/// Result handed across the caption service boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptionOutcome {
    Generated(CaptionBatch),
    Failed { filename: String, error: String },
}

impl CaptionOutcome {
    pub fn failed(filename: impl Into<String>, error: impl ToString) -> Self {
        Self::Failed {
            filename: filename.into(),
            error: error.to_string(),
        }
    }

    pub fn filename(&self) -> &str {
        match self {
            Self::Generated(batch) => &batch.filename,
            Self::Failed { filename, .. } => filename,
        }
    }
}

/// Recorded in place of a filename when the path has none.
pub const UNKNOWN_FILENAME: &str = "unknown";

/// Round to the nearest integer, exact halves to the even neighbour.
fn round_half_even(value: f64) -> f64 {
    let rounded = value.round();
    if (value - value.trunc()).abs() == 0.5 && rounded % 2.0 != 0.0 {
        rounded - value.signum()
    } else {
        rounded
    }
}

/// Basename of an image path, as recorded in output. Never empty.
pub fn file_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    if name.trim().is_empty() {
        UNKNOWN_FILENAME.to_string()
    } else {
        name
    }
}
