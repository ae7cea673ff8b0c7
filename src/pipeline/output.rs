use crate::common_types::LanguageCode;
use crate::errors::AppError;
use crate::file_converters::pdf::{PdfInfo, PdfPageInfo};
use crate::file_converters::FileConverters;
use crate::pipeline::{PageOutcome, SourcePage};
use crate::AppResult;
use chrono::{DateTime, Utc};
use rvstruct::ValueStruct;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Json,
    Text,
}

impl OutputFormat {
    pub fn detect(output: &Path) -> AppResult<Self> {
        let extension = output
            .extension()
            .map(|extension| extension.to_string_lossy().to_lowercase());
        match extension.as_deref() {
            Some("pdf") => Ok(OutputFormat::Pdf),
            Some("json") => Ok(OutputFormat::Json),
            Some("txt") => Ok(OutputFormat::Text),
            _ => Err(AppError::UnsupportedOutput {
                file_path: output.display().to_string(),
                message: "expected a .pdf, .json or .txt file".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DocumentResult {
    pub creator: String,
    pub plugin: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
    pub pages: Vec<PageOutcome>,
}

impl DocumentResult {
    pub const PAGE_SEPARATOR: char = '\x0c';

    pub fn new(creator: String, plugin: &str, language: LanguageCode, pages: Vec<PageOutcome>) -> Self {
        Self {
            creator,
            plugin: plugin.to_string(),
            language: language.value().clone(),
            created_at: Utc::now(),
            pages,
        }
    }

    /// Page texts separated by form feeds. Failed pages contribute an empty page.
    pub fn text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.result().map(|result| result.text.as_str()).unwrap_or(""))
            .collect::<Vec<&str>>()
            .join(&Self::PAGE_SEPARATOR.to_string())
    }
}

pub async fn write_document(
    output: &Path,
    output_format: OutputFormat,
    document: &DocumentResult,
    source_pages: Vec<SourcePage>,
    converters: &FileConverters,
    text_layer_font: Option<&Path>,
) -> AppResult<()> {
    match output_format {
        OutputFormat::Json => {
            let json = serde_json::to_vec_pretty(document)?;
            tokio::fs::write(output, json).await?;
        }
        OutputFormat::Text => {
            tokio::fs::write(output, document.text()).await?;
        }
        OutputFormat::Pdf => {
            let pdf_image_converter = converters.pdf_image_converter.as_ref().ok_or_else(|| {
                AppError::UnsupportedOutput {
                    file_path: output.display().to_string(),
                    message: "PDF output is not available (pdfium library not found)".to_string(),
                }
            })?;
            let pdf_info = PdfInfo {
                pages: source_pages
                    .into_iter()
                    .zip(document.pages.iter())
                    .map(|(source_page, outcome)| PdfPageInfo {
                        width_points: source_page.width_points,
                        height_points: source_page.height_points,
                        page_as_image: source_page.image.image,
                        text_layer: outcome.result().cloned(),
                    })
                    .collect(),
            };
            let pdf_bytes = pdf_image_converter.images_to_pdf(pdf_info, text_layer_font)?;
            tokio::fs::write(output, pdf_bytes).await?;
        }
    }
    Ok(())
}
