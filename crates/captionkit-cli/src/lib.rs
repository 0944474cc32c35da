//! CaptionKit CLI — batch annotation of an image folder.

pub mod process;

pub use process::{list_images, process_folder, simple_output_path, BatchSummary};
