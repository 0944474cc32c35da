//! CaptionKit — turns image captions into structured annotations.

use std::path::PathBuf;

use captionkit_annotate::{analyze_caption, Annotator};
use captionkit_caption::CaptionerBackend;
use captionkit_cli::process_folder;
use captionkit_core::CaptionKitConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_help() {
    println!("CaptionKit — caption annotation for chat assistants");
    println!();
    println!("Usage: captionkit [command]");
    println!();
    println!("Commands:");
    println!("  (none)                       Process the configured input folder");
    println!("  process [input] [output]     Process a folder of images");
    println!("  annotate <caption...>        Annotate a single caption and print JSON");
    println!("  help                         Show this help message");
    println!();
    println!("Environment:");
    println!("  CAPTIONKIT_INPUT_DIR, CAPTIONKIT_OUTPUT_FILE, CAPTIONKIT_MANIFEST,");
    println!("  CAPTIONKIT_MODEL, CAPTIONKIT_DEVICE, RUST_LOG");
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut config = CaptionKitConfig::from_env();

    match args.get(1).map(String::as_str) {
        None | Some("process") => {
            if let Some(input) = args.get(2) {
                config.input_dir = PathBuf::from(input);
            }
            if let Some(output) = args.get(3) {
                config.output_file = PathBuf::from(output);
            }
        }
        Some("annotate") => {
            if args.len() < 3 {
                eprintln!("Usage: captionkit annotate <caption text>");
                std::process::exit(1);
            }
            let caption = args[2..].join(" ");
            let analysis = analyze_caption(&caption);
            println!("{}", serde_json::to_string_pretty(&analysis)?);
            return Ok(());
        }
        Some("--help") | Some("-h") | Some("help") => {
            print_help();
            return Ok(());
        }
        Some(other) => {
            eprintln!("Unknown command: {}. Use 'captionkit help' for usage.", other);
            std::process::exit(1);
        }
    }

    // Caller-owned captioner, passed by reference into the pipeline
    let captioner = captionkit_caption::create_captioner(
        config.manifest.as_deref(),
        &config.model,
        &config.device,
    );
    info!(
        "Captioner {} on {} (available: {})",
        captioner.model_name(),
        captioner.device(),
        captioner.is_available()
    );

    let annotator = Annotator::new(captioner.as_ref());
    let summary = process_folder(&config.input_dir, &config.output_file, &annotator)
        .map_err(|e| anyhow::anyhow!("Failed to process {}: {}", config.input_dir.display(), e))?;

    info!(
        "Generated annotations for {} images ({} failed)",
        summary.processed, summary.failed
    );

    Ok(())
}
