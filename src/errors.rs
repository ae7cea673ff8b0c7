use indicatif::style::TemplateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("OCR engine '{plugin}' failed: {message}")]
    EngineInvocationError { plugin: String, message: String },
    #[error("Language '{language}' is not supported by the '{plugin}' OCR engine")]
    UnsupportedLanguageError { plugin: String, language: String },
    #[error("Unexpected OCR engine output from '{plugin}': {message}")]
    ResultTranslationError { plugin: String, message: String },
    #[error("Unknown OCR plugin is specified: {plugin_name}. Available plugins: {available}")]
    UnknownPlugin {
        plugin_name: String,
        available: String,
    },
    #[error("Plugin config error: {message}")]
    PluginConfigError { message: String },
    #[error("Unsupported input file '{file_path}': {message}")]
    UnsupportedInput { file_path: String, message: String },
    #[error("Unsupported output file '{file_path}': {message}")]
    UnsupportedOutput { file_path: String, message: String },
    #[error("Page {page_number} failed: {source}")]
    PageFailed {
        page_number: usize,
        #[source]
        source: Box<AppError>,
    },
    #[error("Input/output error")]
    InputOutputError(#[from] std::io::Error),
    #[error("HTTP client error:\n{0}")]
    HttpClientError(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Template error: {0}")]
    TemplateError(#[from] TemplateError),
    #[cfg(feature = "pdf-render")]
    #[error("PDF conversion error: {0}")]
    PdfiumError(#[from] pdfium_render::prelude::PdfiumError),
    #[error("Image conversion error: {0}")]
    ImageError(#[from] image::ImageError),
    #[error("System error: {message}")]
    SystemError { message: String },
}

impl AppError {
    pub fn engine_invocation<P: AsRef<str>, M: ToString>(plugin: P, message: M) -> Self {
        Self::EngineInvocationError {
            plugin: plugin.as_ref().to_string(),
            message: message.to_string(),
        }
    }

    pub fn result_translation<P: AsRef<str>, M: ToString>(plugin: P, message: M) -> Self {
        Self::ResultTranslationError {
            plugin: plugin.as_ref().to_string(),
            message: message.to_string(),
        }
    }

    pub fn for_page(self, page_number: usize) -> Self {
        match self {
            err @ AppError::PageFailed { .. } => err,
            err => AppError::PageFailed {
                page_number,
                source: Box::new(err),
            },
        }
    }
}
