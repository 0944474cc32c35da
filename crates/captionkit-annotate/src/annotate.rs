//! Annotation pipeline: caption outcome → classified record.

use std::path::Path;

use captionkit_caption::{CaptionBatch, CaptionOutcome, CaptionerBackend};
use chrono::{DateTime, Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::describe::create_description;
use crate::record::{
    AnnotatedImage, AnnotationRecord, FailedImage, ProcessingMetadata, RecordImageProperties,
};
use crate::scene::{analyze_scene_context, SceneContext};
use crate::tags::{extract_tags_by_category, merge_categories};
use crate::topics::related_topics;

/// Fallback for `simple_caption` when a record has no captions.
pub const NO_CAPTION: &str = "Unable to generate caption";

/// Classification of a single caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionAnalysis {
    pub tags: Vec<String>,
    pub scene_context: SceneContext,
    pub ai_description: String,
    pub related_topics: Vec<String>,
}

/// Run tag extraction, scene inference, description and topics on a caption.
pub fn analyze_caption(caption: &str) -> CaptionAnalysis {
    let grouped = extract_tags_by_category(caption);
    for (category, matched) in &grouped {
        debug!("Tag category {}: {} hits", category.as_str(), matched.len());
    }
    let tags = merge_categories(grouped);
    let scene_context = analyze_scene_context(caption);
    let ai_description = create_description(caption, &scene_context, &tags);
    let related_topics = related_topics(&tags, &scene_context);

    CaptionAnalysis {
        tags: tags.into_iter().collect(),
        scene_context,
        ai_description,
        related_topics,
    }
}

/// ISO-8601 local timestamp as written on records.
pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Text of the first caption variant, for the simple output format.
pub fn simple_caption(record: &AnnotationRecord) -> &str {
    record
        .captions()
        .first()
        .map(|c| c.text.as_str())
        .unwrap_or(NO_CAPTION)
}

/// Turns caption results into annotation records.
pub struct Annotator<'a> {
    captioner: &'a dyn CaptionerBackend,
}

impl<'a> Annotator<'a> {
    pub fn new(captioner: &'a dyn CaptionerBackend) -> Self {
        Self { captioner }
    }

    pub fn metadata(&self) -> ProcessingMetadata {
        ProcessingMetadata::new(self.captioner.model_name(), self.captioner.device())
    }

    /// Caption an image through the backend and annotate the result.
    pub fn annotate_image(&self, path: &Path) -> AnnotationRecord {
        let outcome = self.captioner.generate(path);
        debug!("Caption outcome received for {}", outcome.filename());
        self.annotate_outcome(outcome)
    }

    /// Annotate an outcome, stamping it with the current time.
    pub fn annotate_outcome(&self, outcome: CaptionOutcome) -> AnnotationRecord {
        self.annotate_outcome_at(outcome, &Local::now())
    }

    /// Annotate an outcome with a fixed timestamp.
    pub fn annotate_outcome_at(
        &self,
        outcome: CaptionOutcome,
        at: &DateTime<Local>,
    ) -> AnnotationRecord {
        let timestamp = format_timestamp(at);

        match outcome {
            CaptionOutcome::Generated(batch) => self.annotate_batch(batch, timestamp),
            CaptionOutcome::Failed { filename, error } => failure(filename, timestamp, error),
        }
    }

    fn annotate_batch(&self, batch: CaptionBatch, timestamp: String) -> AnnotationRecord {
        let Some(primary) = batch.primary().map(|c| c.text.clone()) else {
            return failure(batch.filename, timestamp, "no captions generated".to_string());
        };

        let analysis = analyze_caption(&primary);
        debug!(
            "Annotated {}: {} tags, {} topics",
            batch.filename,
            analysis.tags.len(),
            analysis.related_topics.len()
        );

        AnnotationRecord::Annotated(AnnotatedImage {
            image_properties: RecordImageProperties::from(&batch.properties),
            filename: batch.filename,
            timestamp,
            ai_description: analysis.ai_description,
            captions: batch.captions,
            tags: analysis.tags,
            scene_context: analysis.scene_context,
            related_topics: analysis.related_topics,
            metadata: self.metadata(),
        })
    }
}

fn failure(filename: String, timestamp: String, error: String) -> AnnotationRecord {
    warn!("Error processing {}: {}", filename, error);
    AnnotationRecord::Failed(FailedImage::new(filename, timestamp, error))
}
