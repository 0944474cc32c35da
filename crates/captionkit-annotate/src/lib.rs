//! CaptionKit Annotate — caption classification into structured annotations.
//!
//! Extracts tags, scene context, a composite description and related
//! conversation topics from a caption using fixed vocabularies, keyword
//! groups and regex word matching. Every function here is pure and reads
//! only its arguments and static tables.

pub mod annotate;
pub mod describe;
pub mod record;
pub mod scene;
pub mod tags;
pub mod topics;

pub use annotate::{analyze_caption, simple_caption, Annotator, CaptionAnalysis};
pub use record::{AnnotatedImage, AnnotationRecord, FailedImage, ProcessingMetadata};
pub use scene::{analyze_scene_context, SceneContext};
pub use tags::{extract_tags, TagCategory, TagSet};
pub use topics::related_topics;
