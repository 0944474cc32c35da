//! Annotation records written for each processed image.

use captionkit_caption::{CaptionVariant, ImageProperties};
use serde::{Deserialize, Serialize};

use crate::scene::SceneContext;

pub const ANALYSIS_VERSION: &str = "1.0";

/// Description used when an image could not be processed.
pub const FAILURE_DESCRIPTION: &str =
    "Unable to process this image. Please try again or use a different image.";

/// Topics offered when an image could not be processed.
pub const FAILURE_TOPICS: &[&str] = &["image analysis", "technical support"];

/// Error text recorded when the upstream failure carried no message.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// Image properties as reported in the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordImageProperties {
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: f64,
    pub format: String,
}

impl From<&ImageProperties> for RecordImageProperties {
    fn from(props: &ImageProperties) -> Self {
        Self {
            width: props.width,
            height: props.height,
            aspect_ratio: props.aspect_ratio(),
            format: props.format_or_default().to_string(),
        }
    }
}

/// How the record was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingMetadata {
    pub model_used: String,
    pub processing_device: String,
    pub analysis_version: String,
}

impl ProcessingMetadata {
    pub fn new(model_used: &str, processing_device: &str) -> Self {
        Self {
            model_used: model_used.to_string(),
            processing_device: processing_device.to_string(),
            analysis_version: ANALYSIS_VERSION.to_string(),
        }
    }
}

/// Full annotation of a successfully captioned image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedImage {
    pub filename: String,
    pub timestamp: String,
    pub image_properties: RecordImageProperties,
    pub ai_description: String,
    pub captions: Vec<CaptionVariant>,
    /// Sorted alphabetically.
    pub tags: Vec<String>,
    pub scene_context: SceneContext,
    pub related_topics: Vec<String>,
    pub metadata: ProcessingMetadata,
}

/// Reduced record for an image the caption service could not handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedImage {
    pub filename: String,
    pub timestamp: String,
    pub error: String,
    pub ai_description: String,
    pub captions: Vec<CaptionVariant>,
    pub tags: Vec<String>,
    /// Always an empty object.
    pub scene_context: serde_json::Map<String, serde_json::Value>,
    pub related_topics: Vec<String>,
}

impl FailedImage {
    pub fn new(filename: String, timestamp: String, error: String) -> Self {
        let error = if error.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            error
        };
        Self {
            filename,
            timestamp,
            error,
            ai_description: FAILURE_DESCRIPTION.to_string(),
            captions: Vec::new(),
            tags: Vec::new(),
            scene_context: serde_json::Map::new(),
            related_topics: FAILURE_TOPICS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// One output entry per input image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationRecord {
    Annotated(AnnotatedImage),
    Failed(FailedImage),
}

impl AnnotationRecord {
    pub fn filename(&self) -> &str {
        match self {
            Self::Annotated(r) => &r.filename,
            Self::Failed(r) => &r.filename,
        }
    }

    pub fn timestamp(&self) -> &str {
        match self {
            Self::Annotated(r) => &r.timestamp,
            Self::Failed(r) => &r.timestamp,
        }
    }

    pub fn ai_description(&self) -> &str {
        match self {
            Self::Annotated(r) => &r.ai_description,
            Self::Failed(r) => &r.ai_description,
        }
    }

    pub fn captions(&self) -> &[CaptionVariant] {
        match self {
            Self::Annotated(r) => &r.captions,
            Self::Failed(r) => &r.captions,
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            Self::Annotated(r) => &r.tags,
            Self::Failed(r) => &r.tags,
        }
    }

    pub fn related_topics(&self) -> &[String] {
        match self {
            Self::Annotated(r) => &r.related_topics,
            Self::Failed(r) => &r.related_topics,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Annotated(_) => None,
            Self::Failed(r) => Some(&r.error),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
