//! OCR pipeline for images and PDFs with pluggable OCR engines.
//!
//! ```no_run
//! # async fn example() -> ocrpipe::AppResult<()> {
//! use ocrpipe::pipeline::{run, PipelineOptions};
//! use std::path::Path;
//!
//! let mut options = PipelineOptions::for_plugin("paddleocr");
//! options.languages = ocrpipe::common_types::LanguageCode::parse_list("kor");
//! let result = run(Path::new("scan.pdf"), Path::new("scan.json"), options).await?;
//! println!("{} pages recognized", result.pages_recognized());
//! # Ok(())
//! # }
//! ```

use crate::errors::AppError;

pub mod args;

pub mod commands;

pub mod common_types;

pub mod errors;

pub mod file_converters;

pub mod pipeline;

pub mod plugins;

pub mod recognition;

pub mod reporter;

pub type AppResult<T> = Result<T, AppError>;

pub fn config_env_var(name: &str) -> Result<String, String> {
    std::env::var(name).map_err(|e| format!("{}: {}", name, e))
}
