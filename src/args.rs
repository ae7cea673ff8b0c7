use crate::common_types::{EngineLanguage, LanguageCode, PluginName};
use crate::errors::AppError;
use crate::pipeline::{PageErrorPolicy, PipelineOptions};
use crate::plugins::paddleocr::PaddleOcrOptions;
use crate::plugins::PluginOptions;
use clap::*;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<CliCommand>,

    #[command(flatten)]
    pub ocr_args: OcrArgs,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    #[command(about = "List registered OCR plugins")]
    Plugins {
        #[command(flatten)]
        plugin_args: PluginArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct OcrArgs {
    #[arg(
        long = "plugin",
        help = "OCR plugin to use. The first one given is used",
        default_value = crate::plugins::paddleocr::PLUGIN_NAME
    )]
    pub plugins: Vec<String>,

    #[arg(
        short = 'l',
        long = "language",
        help = "Document language such as eng, kor or chi_sim. Multiple languages can be joined with '+'",
        default_value = LanguageCode::DEFAULT
    )]
    pub languages: Vec<String>,

    #[arg(
        short = 'j',
        long,
        help = "Number of pages to recognize at the same time (capped by the plugin). Defaults to the number of CPUs"
    )]
    pub jobs: Option<usize>,

    #[arg(
        long,
        value_enum,
        help = "What to do when recognition of a page fails",
        default_value = "abort"
    )]
    pub on_page_error: PageErrorPolicy,

    #[arg(
        long,
        help = "DPI assumed for image inputs (default is 300)"
    )]
    pub image_dpi: Option<f32>,

    #[arg(
        long,
        help = "TrueType font for the PDF text layer. Required for PDF output in languages outside Western European scripts"
    )]
    pub text_layer_font: Option<PathBuf>,

    #[arg(
        long,
        help = "Detect the rotation of each page and record it in JSON output"
    )]
    pub detect_orientation: bool,

    #[arg(required = true, help = "Input image or PDF file")]
    pub input: Option<PathBuf>,

    #[arg(
        required = true,
        help = "Output file. The format follows the extension: .pdf, .json or .txt"
    )]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub plugin_args: PluginArgs,
}

#[derive(Args, Debug, Clone)]
#[group(required = false)]
pub struct PluginArgs {
    #[arg(
        long = "paddleocr-endpoint",
        help = "PaddleOCR serving endpoint for a language as <lang>=<url>, such as kor=http://127.0.0.1:8081/ocr. Can be repeated. Defaults to PADDLEOCR_ENDPOINTS or en=http://127.0.0.1:8080/ocr",
        value_parser = PaddleOcrOptions::parse_endpoint
    )]
    pub paddleocr_endpoints: Vec<(EngineLanguage, Url)>,

    #[arg(long, help = "PaddleOCR request timeout in seconds (default is 300)")]
    pub paddleocr_timeout_secs: Option<u64>,

    #[arg(
        long,
        help = "Directory with ocrs text-detection.rten and text-recognition.rten models. Defaults to OCRS_MODELS_DIR"
    )]
    pub ocrs_models_dir: Option<PathBuf>,
}

impl TryInto<PluginOptions> for PluginArgs {
    type Error = AppError;

    fn try_into(self) -> Result<PluginOptions, Self::Error> {
        let endpoints = if self.paddleocr_endpoints.is_empty() {
            match crate::config_env_var("PADDLEOCR_ENDPOINTS") {
                Ok(value) => PaddleOcrOptions::parse_endpoint_list(&value)
                    .map_err(|message| AppError::PluginConfigError { message })?,
                Err(_) => PaddleOcrOptions::default().endpoints,
            }
        } else {
            self.paddleocr_endpoints.into_iter().collect()
        };
        let mut paddleocr = PaddleOcrOptions::new(endpoints);
        if let Some(timeout_secs) = self.paddleocr_timeout_secs {
            if timeout_secs == 0 {
                return Err(AppError::PluginConfigError {
                    message: "PaddleOCR timeout must be positive".to_string(),
                });
            }
            paddleocr.request_timeout = Duration::from_secs(timeout_secs);
        }

        #[cfg(feature = "ocr")]
        let ocrs = crate::plugins::ocrs_engine::OcrsOptions {
            models_dir: self
                .ocrs_models_dir
                .or_else(|| crate::config_env_var("OCRS_MODELS_DIR").ok().map(PathBuf::from)),
        };

        Ok(PluginOptions {
            paddleocr,
            #[cfg(feature = "ocr")]
            ocrs,
        })
    }
}

impl TryInto<PipelineOptions> for OcrArgs {
    type Error = AppError;

    fn try_into(self) -> Result<PipelineOptions, Self::Error> {
        let plugins: Vec<PluginName> = self
            .plugins
            .iter()
            .map(|plugin| plugin.trim())
            .filter(|plugin| !plugin.is_empty())
            .map(|plugin| PluginName::from(plugin.to_string()))
            .collect();
        if plugins.is_empty() {
            return Err(AppError::PluginConfigError {
                message: "OCR plugin name is required".to_string(),
            });
        }
        let languages: Vec<LanguageCode> = self
            .languages
            .iter()
            .flat_map(|language| LanguageCode::parse_list(language))
            .collect();
        let jobs = match self.jobs {
            Some(0) => {
                return Err(AppError::PluginConfigError {
                    message: "Number of jobs must be positive".to_string(),
                })
            }
            Some(jobs) => jobs,
            None => std::thread::available_parallelism()
                .map(|jobs| jobs.get())
                .unwrap_or(1),
        };
        let plugin_options: PluginOptions = self.plugin_args.try_into()?;
        let mut options = PipelineOptions::new(
            plugins,
            languages,
            jobs,
            self.on_page_error,
            plugin_options,
        );
        options.image_dpi = self.image_dpi;
        options.text_layer_font = self.text_layer_font;
        options.detect_orientation = self.detect_orientation;
        Ok(options)
    }
}

#[allow(unused_imports)]
#[cfg(test)]
mod tests {
    use super::*;
    use rvstruct::ValueStruct;

    #[test]
    fn test_parse_ocr_command_line() -> Result<(), Box<dyn std::error::Error>> {
        let cli = CliArgs::try_parse_from([
            "ocrpipe",
            "--plugin",
            "paddleocr",
            "-l",
            "kor",
            "--paddleocr-endpoint",
            "kor=http://127.0.0.1:8081/ocr",
            "input.pdf",
            "output.pdf",
        ])?;
        assert!(cli.command.is_none());
        assert_eq!(cli.ocr_args.input, Some(PathBuf::from("input.pdf")));
        assert_eq!(cli.ocr_args.output, Some(PathBuf::from("output.pdf")));

        let options: PipelineOptions = cli.ocr_args.try_into()?;
        assert_eq!(options.plugin_name()?.value(), "paddleocr");
        assert_eq!(options.language().value(), "kor");
        assert_eq!(options.page_error_policy, PageErrorPolicy::Abort);
        assert!(options.jobs >= 1);
        assert!(options
            .plugin_options
            .paddleocr
            .endpoints
            .contains_key(&EngineLanguage::from("korean".to_string())));
        Ok(())
    }

    #[test]
    fn test_joined_languages_use_first() -> Result<(), Box<dyn std::error::Error>> {
        let cli = CliArgs::try_parse_from([
            "ocrpipe",
            "-l",
            "chi_sim+eng",
            "-j",
            "4",
            "--on-page-error",
            "skip",
            "--image-dpi",
            "150",
            "--detect-orientation",
            "scan.png",
            "scan.json",
        ])?;
        let options: PipelineOptions = cli.ocr_args.try_into()?;
        assert_eq!(options.languages.len(), 2);
        assert_eq!(options.language().value(), "chi_sim");
        assert_eq!(options.plugin_name()?.value(), "paddleocr");
        assert_eq!(options.jobs, 4);
        assert_eq!(options.page_error_policy, PageErrorPolicy::Skip);
        assert_eq!(options.image_dpi, Some(150.0));
        assert!(options.detect_orientation);
        Ok(())
    }

    #[test]
    fn test_input_and_output_are_required() {
        assert!(CliArgs::try_parse_from(["ocrpipe", "input.pdf"]).is_err());
        assert!(CliArgs::try_parse_from(["ocrpipe", "--paddleocr-endpoint", "en", "a.png", "b.txt"]).is_err());
    }

    #[test]
    fn test_zero_jobs_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let cli = CliArgs::try_parse_from(["ocrpipe", "-j", "0", "a.png", "b.txt"])?;
        let options: Result<PipelineOptions, AppError> = cli.ocr_args.try_into();
        assert!(matches!(options, Err(AppError::PluginConfigError { .. })));
        Ok(())
    }

    #[test]
    fn test_plugins_subcommand() -> Result<(), Box<dyn std::error::Error>> {
        let cli = CliArgs::try_parse_from(["ocrpipe", "plugins"])?;
        assert!(matches!(cli.command, Some(CliCommand::Plugins { .. })));
        Ok(())
    }
}
