//! End-to-end folder processing against a caption manifest.
//!
//! Builds a temporary image folder (empty files; nothing is decoded), a
//! manifest of caption results, and checks the shape of both output files.

use std::path::Path;

use captionkit_annotate::Annotator;
use captionkit_caption::{ManifestCaptioner, NoopCaptioner};
use captionkit_cli::process_folder;

const MANIFEST: &str = r#"[
    {"filename": "basketball.jpg", "width": 1024, "height": 768, "format": "JPEG",
     "captions": [
        {"type": "standard", "text": "a group of people playing basketball at night"},
        {"type": "detailed",
         "text": "a group of young people playing basketball on an outdoor court at night"}
     ]},
    {"filename": "park.png", "width": 800, "height": 800, "format": "PNG",
     "captions": [{"type": "standard", "text": "a man running in a park"}]},
    {"filename": "x.jpg", "error": "file not found"}
]"#;

fn touch(dir: &Path, names: &[&str]) {
    for name in names {
        std::fs::write(dir.join(name), b"").unwrap();
    }
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_every_input_gets_a_record() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    touch(
        input.path(),
        &["basketball.jpg", "park.png", "x.jpg", "unlisted.jpeg", "readme.txt"],
    );

    let manifest_path = output.path().join("manifest.json");
    std::fs::write(&manifest_path, MANIFEST).unwrap();
    let captioner = ManifestCaptioner::load(&manifest_path, "BLIP-base", "cpu").unwrap();
    let annotator = Annotator::new(&captioner);

    let output_file = output.path().join("outputs").join("ai_captions.json");
    let summary = process_folder(input.path(), &output_file, &annotator).unwrap();
    assert_eq!(summary.processed, 4);
    assert_eq!(summary.failed, 2);

    let annotated = read_json(&output_file);
    let images = annotated["images"].as_array().unwrap();
    assert_eq!(images.len(), 4);

    // Sorted by filename: basketball.jpg, park.png, unlisted.jpeg, x.jpg
    let basketball = &images[0];
    assert_eq!(basketball["filename"], "basketball.jpg");
    assert_eq!(basketball["image_properties"]["aspect_ratio"], 1.33);
    assert_eq!(basketball["scene_context"]["time_of_day"], "night");
    assert_eq!(basketball["scene_context"]["social_context"], "group");
    assert_eq!(
        basketball["tags"],
        serde_json::json!(["basketball", "night", "people", "playing"])
    );
    let topics = basketball["related_topics"].as_array().unwrap();
    assert!(topics.contains(&serde_json::json!("sports")));
    assert!(topics.contains(&serde_json::json!("athletics")));
    assert_eq!(basketball["metadata"]["analysis_version"], "1.0");
    assert_eq!(basketball["captions"][0]["type"], "standard");

    let park = &images[1];
    assert_eq!(park["scene_context"]["setting"], "outdoor");
    assert_eq!(park["scene_context"]["activity_level"], "high");
    assert_eq!(park["scene_context"]["social_context"], "individual");

    let unlisted = &images[2];
    assert_eq!(unlisted["filename"], "unlisted.jpeg");
    assert_eq!(unlisted["error"], "file not found");

    let failed = &images[3];
    assert_eq!(failed["filename"], "x.jpg");
    assert_eq!(failed["error"], "file not found");
    assert_eq!(failed["tags"], serde_json::json!([]));
    assert_eq!(failed["captions"], serde_json::json!([]));
    assert_eq!(failed["scene_context"], serde_json::json!({}));
    assert_eq!(
        failed["related_topics"],
        serde_json::json!(["image analysis", "technical support"])
    );

    let simple = read_json(&output.path().join("outputs").join("captions.json"));
    assert_eq!(
        simple["images"][0],
        serde_json::json!({
            "filename": "basketball.jpg",
            "caption": "a group of people playing basketball at night",
        })
    );
    assert_eq!(simple["images"][3]["caption"], "No caption available");
}

#[test]
fn test_empty_folder_writes_nothing() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    touch(input.path(), &["notes.txt"]);

    let captioner = NoopCaptioner::new("BLIP-base", "cpu");
    let annotator = Annotator::new(&captioner);
    let output_file = output.path().join("ai_captions.json");

    let summary = process_folder(input.path(), &output_file, &annotator).unwrap();
    assert_eq!(summary.processed, 0);
    assert!(summary.output_file.is_none());
    assert!(!output_file.exists());
}
