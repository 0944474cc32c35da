//! Folder processing: list images, annotate each, write JSON outputs.

use std::path::{Path, PathBuf};

use captionkit_annotate::{simple_caption, AnnotationRecord, Annotator};
use captionkit_core::Result;
use serde::Serialize;
use tracing::info;

/// Extensions recognized as images.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Caption written to the simple output when a record has none.
pub const NO_CAPTION_AVAILABLE: &str = "No caption available";

#[derive(Serialize)]
struct AnnotatedOutput<'a> {
    images: &'a [AnnotationRecord],
}

#[derive(Serialize)]
struct SimpleEntry<'a> {
    filename: &'a str,
    caption: &'a str,
}

#[derive(Serialize)]
struct SimpleOutput<'a> {
    images: Vec<SimpleEntry<'a>>,
}

/// Outcome of a folder run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
    pub output_file: Option<PathBuf>,
    pub simple_output_file: Option<PathBuf>,
}

/// Image files directly inside `folder`, sorted by path.
pub fn list_images(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
            .unwrap_or(false);
        if is_image {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// Companion file for the simple format: `ai_captions.json` becomes
/// `captions.json`, anything else gets a `_simple` suffix.
pub fn simple_output_path(output_file: &Path) -> PathBuf {
    let name = output_file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("ai_captions.json");

    let simple_name = if name.contains("ai_captions.json") {
        name.replace("ai_captions.json", "captions.json")
    } else {
        let stem = output_file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("captions");
        format!("{}_simple.json", stem)
    };

    output_file.with_file_name(simple_name)
}

/// Annotate every image in `input_folder` and write both output files.
pub fn process_folder(
    input_folder: &Path,
    output_file: &Path,
    annotator: &Annotator<'_>,
) -> Result<BatchSummary> {
    info!("Processing images from: {}", input_folder.display());
    let images = list_images(input_folder)?;

    if images.is_empty() {
        info!("No images found in {}", input_folder.display());
        return Ok(BatchSummary::default());
    }

    if let Some(parent) = output_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    info!("Found {} images to process", images.len());

    let mut records: Vec<AnnotationRecord> = Vec::with_capacity(images.len());
    for (i, path) in images.iter().enumerate() {
        let record = annotator.annotate_image(path);
        info!("[{}/{}] Processing: {}", i + 1, images.len(), record.filename());

        let preview: String = record.ai_description().chars().take(100).collect();
        info!("  AI Description: {}...", preview);
        let tags: Vec<&str> = record.tags().iter().take(5).map(String::as_str).collect();
        info!("  Tags: {}", tags.join(", "));

        records.push(record);
    }

    let output = serde_json::to_string_pretty(&AnnotatedOutput { images: &records })?;
    std::fs::write(output_file, output)?;
    info!("Results saved to: {}", output_file.display());

    let simple = SimpleOutput {
        images: records
            .iter()
            .map(|r| SimpleEntry {
                filename: r.filename(),
                caption: if r.captions().is_empty() {
                    NO_CAPTION_AVAILABLE
                } else {
                    simple_caption(r)
                },
            })
            .collect(),
    };
    let simple_file = simple_output_path(output_file);
    std::fs::write(&simple_file, serde_json::to_string_pretty(&simple)?)?;
    info!("Simple format also saved to: {}", simple_file.display());

    let failed = records.iter().filter(|r| r.is_failure()).count();
    info!(
        "Processing complete: {} images, {} failed",
        records.len(),
        failed
    );

    Ok(BatchSummary {
        processed: records.len(),
        failed,
        output_file: Some(output_file.to_path_buf()),
        simple_output_file: Some(simple_file),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_output_path() {
        assert_eq!(
            simple_output_path(Path::new("outputs/ai_captions.json")),
            PathBuf::from("outputs/captions.json")
        );
        assert_eq!(
            simple_output_path(Path::new("out/results.json")),
            PathBuf::from("out/results_simple.json")
        );
    }

    #[test]
    fn test_list_images_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.JPG", "a.png", "notes.txt", "c.jpeg", "d.gif"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let names: Vec<String> = list_images(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.png", "b.JPG", "c.jpeg"]);
    }

    #[test]
    fn test_list_images_missing_folder() {
        assert!(list_images(Path::new("/definitely/not/here")).is_err());
    }
}
