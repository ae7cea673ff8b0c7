use crate::common_types::{LanguageCode, PluginName};
use crate::errors::AppError;
use crate::file_converters::FileConverters;
use crate::plugins::{OcrPlugin, PluginOptions, PluginRegistry};
use crate::reporter::AppReporter;
use crate::AppResult;
use indicatif::ProgressBar;
use rsb_derive::Builder;
use rvstruct::ValueStruct;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod input;
pub use input::*;

mod output;
pub use output::*;

mod scheduler;
pub use scheduler::*;

/// What happens to the document when recognition of one page fails.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageErrorPolicy {
    /// Fail the whole document with the page error.
    #[default]
    Abort,
    /// Record the page as failed and write it without text.
    Skip,
}

#[derive(Debug, Clone, Builder)]
pub struct PipelineOptions {
    /// Plugin names in order of preference. The first one is used.
    pub plugins: Vec<PluginName>,
    pub languages: Vec<LanguageCode>,
    pub jobs: usize,
    pub page_error_policy: PageErrorPolicy,
    pub plugin_options: PluginOptions,
    pub image_dpi: Option<f32>,
    pub text_layer_font: Option<PathBuf>,
    /// Ask the plugin for each page's rotation and record it with the result.
    #[default = "false"]
    pub detect_orientation: bool,
}

impl PipelineOptions {
    pub const DEFAULT_IMAGE_DPI: f32 = 300.0;

    pub fn for_plugin(plugin_name: &str) -> Self {
        Self::new(
            vec![PluginName::from(plugin_name.to_string())],
            vec![LanguageCode::from(LanguageCode::DEFAULT.to_string())],
            1,
            PageErrorPolicy::default(),
            PluginOptions::default(),
        )
    }

    /// The language hint handed to the plugin.
    pub fn language(&self) -> LanguageCode {
        self.languages
            .first()
            .cloned()
            .unwrap_or_else(|| LanguageCode::from(LanguageCode::DEFAULT.to_string()))
    }

    pub fn plugin_name(&self) -> AppResult<&PluginName> {
        self.plugins.first().ok_or_else(|| AppError::PluginConfigError {
            message: "No OCR plugin is specified".to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub document: DocumentResult,
    /// Highest number of page jobs that were running at the same time.
    pub peak_jobs: usize,
}

impl PipelineResult {
    pub fn pages_recognized(&self) -> usize {
        self.document
            .pages
            .iter()
            .filter(|page| page.result().is_some())
            .count()
    }

    pub fn pages_failed(&self) -> usize {
        self.document.pages.len() - self.pages_recognized()
    }
}

/// Recognizes `input` and writes the result to `output` without any terminal output.
pub async fn run(input: &Path, output: &Path, options: PipelineOptions) -> AppResult<PipelineResult> {
    let reporter = AppReporter::silent();
    let bar = ProgressBar::hidden();
    run_with_reporter(input, output, options, &reporter, &bar).await
}

pub async fn run_with_reporter<'a>(
    input: &Path,
    output: &Path,
    mut options: PipelineOptions,
    reporter: &'a AppReporter<'a>,
    bar: &ProgressBar,
) -> AppResult<PipelineResult> {
    let output_format = OutputFormat::detect(output)?;
    let language = options.language();
    if output_format == OutputFormat::Pdf
        && options.text_layer_font.is_none()
        && !language.fits_standard_font()
    {
        return Err(AppError::PluginConfigError {
            message: format!(
                "PDF text layer for language '{}' needs a TrueType font covering its script (--text-layer-font)",
                language.value()
            ),
        });
    }
    let plugin_name = options.plugin_name()?.clone();
    let registry = PluginRegistry::default();
    let plugin = registry
        .open(&plugin_name, &options.plugin_options, reporter)
        .await?;

    let result = recognize_document(
        &plugin,
        input,
        output,
        output_format,
        &mut options,
        reporter,
        bar,
    )
    .await;

    let close_result = plugin.close().await;
    let pipeline_result = result?;
    close_result?;
    Ok(pipeline_result)
}

async fn recognize_document<'a, P: OcrPlugin>(
    plugin: &P,
    input: &Path,
    output: &Path,
    output_format: OutputFormat,
    options: &mut PipelineOptions,
    reporter: &'a AppReporter<'a>,
    bar: &ProgressBar,
) -> AppResult<PipelineResult> {
    plugin.check_options(options);
    let language = options.language();
    if !plugin.supports_language(&language) {
        return Err(AppError::UnsupportedLanguageError {
            plugin: plugin.name().to_string(),
            language: language.value().clone(),
        });
    }
    plugin.warm_up(&language).await?;

    let input_kind = InputKind::detect(input)?;
    let converters = if input_kind == InputKind::Pdf || output_format == OutputFormat::Pdf {
        FileConverters::new().init()
    } else {
        FileConverters::new()
    };

    let image_dpi = options
        .image_dpi
        .unwrap_or(PipelineOptions::DEFAULT_IMAGE_DPI);
    let source_pages = load_pages(input, input_kind, image_dpi, &converters).await?;
    reporter.report(format!(
        "Recognizing {} page(s) with {} (language: {}, jobs: {})",
        source_pages.len(),
        plugin.creator_tag(),
        language.value(),
        options.jobs
    ))?;

    bar.set_length(source_pages.len() as u64);
    let scheduler = PageScheduler::new(options.jobs).with_orientation(options.detect_orientation);
    let outcomes = scheduler
        .recognize_pages(
            plugin,
            source_pages.iter().map(|page| &page.image),
            &language,
            options.page_error_policy,
            bar,
        )
        .await?;

    let document = DocumentResult::new(plugin.creator_tag(), plugin.name(), language, outcomes);
    write_document(
        output,
        output_format,
        &document,
        source_pages,
        &converters,
        options.text_layer_font.as_deref(),
    )
    .await?;
    tracing::info!(
        output = %output.display(),
        pages = document.pages.len(),
        peak_jobs = scheduler.peak_jobs(),
        "Document written"
    );

    Ok(PipelineResult {
        document,
        peak_jobs: scheduler.peak_jobs(),
    })
}
