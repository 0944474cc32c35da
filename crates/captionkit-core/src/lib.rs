//! CaptionKit Core — error types and configuration shared by all crates.

pub mod config;
pub mod error;

pub use config::CaptionKitConfig;
pub use error::{Error, Result};
