//! Runtime configuration resolved from the environment.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_INPUT_DIR: &str = "data";
pub const DEFAULT_OUTPUT_FILE: &str = "outputs/ai_captions.json";
pub const DEFAULT_MODEL: &str = "BLIP-base";
pub const DEFAULT_DEVICE: &str = "cpu";

/// Top-level CaptionKit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionKitConfig {
    /// Folder scanned for images (`data/`).
    pub input_dir: PathBuf,
    /// Annotated output file (`outputs/ai_captions.json`).
    pub output_file: PathBuf,
    /// Precomputed caption manifest, if any.
    pub manifest: Option<PathBuf>,
    /// Caption model name reported in record metadata.
    pub model: String,
    /// Processing device reported in record metadata.
    pub device: String,
}

impl Default for CaptionKitConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            manifest: None,
            model: DEFAULT_MODEL.to_string(),
            device: DEFAULT_DEVICE.to_string(),
        }
    }
}

impl CaptionKitConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            input_dir: non_empty("CAPTIONKIT_INPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.input_dir),
            output_file: non_empty("CAPTIONKIT_OUTPUT_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_file),
            manifest: non_empty("CAPTIONKIT_MANIFEST").map(PathBuf::from),
            model: non_empty("CAPTIONKIT_MODEL").unwrap_or(defaults.model),
            device: non_empty("CAPTIONKIT_DEVICE").unwrap_or(defaults.device),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = CaptionKitConfig::from_lookup(|_| None);
        assert_eq!(config.input_dir, PathBuf::from("data"));
        assert_eq!(config.output_file, PathBuf::from("outputs/ai_captions.json"));
        assert!(config.manifest.is_none());
        assert_eq!(config.model, "BLIP-base");
        assert_eq!(config.device, "cpu");
    }

    #[test]
    fn test_overrides_and_blank_values() {
        let vars: HashMap<&str, &str> = [
            ("CAPTIONKIT_INPUT_DIR", "photos"),
            ("CAPTIONKIT_MANIFEST", "captions/manifest.json"),
            ("CAPTIONKIT_DEVICE", "  "),
        ]
        .into_iter()
        .collect();
        let config = CaptionKitConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.input_dir, PathBuf::from("photos"));
        assert_eq!(config.manifest, Some(PathBuf::from("captions/manifest.json")));
        assert_eq!(config.device, "cpu");
    }
}
