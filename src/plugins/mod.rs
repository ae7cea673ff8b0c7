use crate::common_types::LanguageCode;
use crate::pipeline::PipelineOptions;
use crate::recognition::{OrientationConfidence, PageImage, RecognitionResult};
use crate::AppResult;
use std::collections::BTreeSet;
use std::fmt::Display;

pub mod paddleocr;
use paddleocr::{PaddleOcrOptions, PaddleOcrPlugin};

#[cfg(feature = "ocr")]
pub mod ocrs_engine;
#[cfg(feature = "ocr")]
use ocrs_engine::{OcrsOptions, OcrsPlugin};

mod registry;
pub use registry::*;

/// Capabilities the pipeline needs from an OCR engine.
#[allow(async_fn_in_trait)]
pub trait OcrPlugin {
    fn name(&self) -> &'static str;

    /// Producer string recorded in output documents.
    fn creator_tag(&self) -> String;

    fn languages(&self) -> BTreeSet<LanguageCode>;

    fn supports_language(&self, language: &LanguageCode) -> bool {
        self.languages().contains(language)
    }

    /// Maximum number of pages the pipeline may recognize at the same time.
    fn report_concurrency_limit(&self) -> usize;

    fn check_options(&self, options: &mut PipelineOptions) {
        let limit = self.report_concurrency_limit().max(1);
        let effective_jobs = options.jobs.clamp(1, limit);
        if effective_jobs != options.jobs {
            tracing::info!(
                "{}: forcing jobs={} (engine parallelizes internally)",
                self.name(),
                effective_jobs
            );
            options.jobs = effective_jobs;
        }
    }

    /// One-time engine preparation for a document in the given language.
    async fn warm_up(&self, language: &LanguageCode) -> AppResult<()>;

    /// Suggested page rotation. Engines without a classifier report upright
    /// with zero confidence.
    async fn get_orientation(
        &self,
        _page: &PageImage,
        _language: &LanguageCode,
    ) -> AppResult<OrientationConfidence> {
        Ok(OrientationConfidence::default())
    }

    async fn recognize(
        &self,
        page: &PageImage,
        language: &LanguageCode,
    ) -> AppResult<RecognitionResult>;

    async fn close(self) -> AppResult<()>;
}

#[derive(Debug, Clone, Default)]
pub struct PluginOptions {
    pub paddleocr: PaddleOcrOptions,
    #[cfg(feature = "ocr")]
    pub ocrs: OcrsOptions,
}

pub enum Plugins<'a> {
    PaddleOcr(PaddleOcrPlugin<'a>),
    #[cfg(feature = "ocr")]
    Ocrs(OcrsPlugin<'a>),
}

impl Display for Plugins<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.creator_tag())
    }
}

impl<'a> OcrPlugin for Plugins<'a> {
    fn name(&self) -> &'static str {
        match self {
            Plugins::PaddleOcr(plugin) => plugin.name(),
            #[cfg(feature = "ocr")]
            Plugins::Ocrs(plugin) => plugin.name(),
        }
    }

    fn creator_tag(&self) -> String {
        match self {
            Plugins::PaddleOcr(plugin) => plugin.creator_tag(),
            #[cfg(feature = "ocr")]
            Plugins::Ocrs(plugin) => plugin.creator_tag(),
        }
    }

    fn languages(&self) -> BTreeSet<LanguageCode> {
        match self {
            Plugins::PaddleOcr(plugin) => plugin.languages(),
            #[cfg(feature = "ocr")]
            Plugins::Ocrs(plugin) => plugin.languages(),
        }
    }

    fn supports_language(&self, language: &LanguageCode) -> bool {
        match self {
            Plugins::PaddleOcr(plugin) => plugin.supports_language(language),
            #[cfg(feature = "ocr")]
            Plugins::Ocrs(plugin) => plugin.supports_language(language),
        }
    }

    fn report_concurrency_limit(&self) -> usize {
        match self {
            Plugins::PaddleOcr(plugin) => plugin.report_concurrency_limit(),
            #[cfg(feature = "ocr")]
            Plugins::Ocrs(plugin) => plugin.report_concurrency_limit(),
        }
    }

    fn check_options(&self, options: &mut PipelineOptions) {
        match self {
            Plugins::PaddleOcr(plugin) => plugin.check_options(options),
            #[cfg(feature = "ocr")]
            Plugins::Ocrs(plugin) => plugin.check_options(options),
        }
    }

    async fn warm_up(&self, language: &LanguageCode) -> AppResult<()> {
        match self {
            Plugins::PaddleOcr(plugin) => plugin.warm_up(language).await,
            #[cfg(feature = "ocr")]
            Plugins::Ocrs(plugin) => plugin.warm_up(language).await,
        }
    }

    async fn get_orientation(
        &self,
        page: &PageImage,
        language: &LanguageCode,
    ) -> AppResult<OrientationConfidence> {
        match self {
            Plugins::PaddleOcr(plugin) => plugin.get_orientation(page, language).await,
            #[cfg(feature = "ocr")]
            Plugins::Ocrs(plugin) => plugin.get_orientation(page, language).await,
        }
    }

    async fn recognize(
        &self,
        page: &PageImage,
        language: &LanguageCode,
    ) -> AppResult<RecognitionResult> {
        match self {
            Plugins::PaddleOcr(plugin) => plugin.recognize(page, language).await,
            #[cfg(feature = "ocr")]
            Plugins::Ocrs(plugin) => plugin.recognize(page, language).await,
        }
    }

    async fn close(self) -> AppResult<()> {
        match self {
            Plugins::PaddleOcr(plugin) => plugin.close().await,
            #[cfg(feature = "ocr")]
            Plugins::Ocrs(plugin) => plugin.close().await,
        }
    }
}
