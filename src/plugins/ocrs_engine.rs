use crate::common_types::{BoundingBox, LanguageCode};
use crate::errors::AppError;
use crate::plugins::OcrPlugin;
use crate::recognition::{PageImage, RecognitionResult, TextLine, TextSpan};
use crate::reporter::AppReporter;
use crate::AppResult;
use ocrs::{ImageSource, OcrEngine, OcrEngineParams, OcrInput, TextItem};
use rvstruct::ValueStruct;
use std::collections::BTreeSet;
use std::path::PathBuf;

pub const PLUGIN_NAME: &str = "ocrs";

#[derive(Debug, Clone, Default)]
pub struct OcrsOptions {
    pub models_dir: Option<PathBuf>,
}

/// In-process adapter over the `ocrs` engine. Latin script only.
pub struct OcrsPlugin<'a> {
    ocr_engine: OcrEngine,
    #[allow(dead_code)]
    reporter: &'a AppReporter<'a>,
}

impl<'a> OcrsPlugin<'a> {
    const SUPPORTED_LANGUAGE: &'static str = "eng";
    const CONCURRENCY_LIMIT: usize = 1;

    pub async fn new(options: OcrsOptions, reporter: &'a AppReporter<'a>) -> AppResult<Self> {
        let models_dir = match options.models_dir {
            Some(models_dir) => models_dir,
            None => Self::find_models_dir()?,
        };
        reporter.report(format!(
            "Loading OCR models from {}",
            models_dir.to_string_lossy()
        ))?;
        let detection_model = rten::Model::load_file(models_dir.join("text-detection.rten"))
            .map_err(|e| AppError::engine_invocation(PLUGIN_NAME, e))?;
        let recognition_model = rten::Model::load_file(models_dir.join("text-recognition.rten"))
            .map_err(|e| AppError::engine_invocation(PLUGIN_NAME, e))?;
        let ocr_engine = OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .map_err(|e| AppError::engine_invocation(PLUGIN_NAME, e))?;
        Ok(Self {
            ocr_engine,
            reporter,
        })
    }

    fn find_models_dir() -> AppResult<PathBuf> {
        let executable = std::env::current_exe()?;
        let current_dir = executable.parent().map(|p| p.to_path_buf());

        vec![
            current_dir.clone().map(|p| p.join("models").join("ocrs")),
            current_dir
                .clone()
                .and_then(|p| p.parent().map(|p| p.join("share").join("ocrs"))),
            dirs::home_dir().map(|p| p.join(".cache").join("ocrs")),
        ]
        .into_iter()
        .flatten()
        .find(|p| p.exists())
        .ok_or_else(|| AppError::PluginConfigError {
            message: "Could not find ocrs models directory. Use --ocrs-models-dir".to_string(),
        })
    }

    fn check_language(language: &LanguageCode) -> AppResult<()> {
        if language.value() == Self::SUPPORTED_LANGUAGE {
            Ok(())
        } else {
            Err(AppError::UnsupportedLanguageError {
                plugin: PLUGIN_NAME.to_string(),
                language: language.value().clone(),
            })
        }
    }

    fn rect_to_bbox(rect: &rten_imageproc::Rect) -> BoundingBox {
        BoundingBox::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.right() as f32,
            rect.bottom() as f32,
        )
    }

    fn recognize_lines(&self, page: &PageImage) -> AppResult<Vec<TextLine>> {
        let engine_error = |e: &dyn std::fmt::Display| AppError::engine_invocation(PLUGIN_NAME, e);
        let rgb_image = page.image.to_rgb8();
        let image_source = ImageSource::from_bytes(rgb_image.as_raw(), rgb_image.dimensions())
            .map_err(|e| engine_error(&e))?;
        let input: OcrInput = self
            .ocr_engine
            .prepare_input(image_source)
            .map_err(|e| engine_error(&e))?;
        let word_rects = self
            .ocr_engine
            .detect_words(&input)
            .map_err(|e| engine_error(&e))?;
        let line_rects = self.ocr_engine.find_text_lines(&input, &word_rects);
        let (page_width, page_height) = (page.image.width() as f32, page.image.height() as f32);

        let mut lines = vec![];
        for text_line in self
            .ocr_engine
            .recognize_text(&input, &line_rects)
            .map_err(|e| engine_error(&e))?
            .into_iter()
            .flatten()
        {
            let mut words: Vec<TextSpan> = vec![];
            let mut current_word = String::new();
            let mut current_word_rect: Option<rten_imageproc::Rect> = None;

            for char in text_line.chars() {
                match current_word_rect {
                    Some(ref current_rect) if char.char == ' ' => {
                        words.extend(Self::word_span(&current_word, current_rect));
                        current_word.clear();
                        current_word_rect = None;
                    }
                    None if char.char == ' ' => {}
                    None => {
                        current_word_rect = Some(char.rect);
                        current_word.push(char.char);
                    }
                    Some(current_rect) => {
                        current_word_rect = Some(current_rect.union(char.rect));
                        current_word.push(char.char);
                    }
                }
            }
            if let Some(ref current_rect) = current_word_rect {
                words.extend(Self::word_span(&current_word, current_rect));
            }

            let words: Vec<TextSpan> = words
                .into_iter()
                .filter_map(|word| {
                    word.bbox
                        .clamp_to(page_width, page_height)
                        .map(|bbox| TextSpan { bbox, ..word })
                })
                .collect();
            if let Some(line_bbox) = words
                .iter()
                .map(|word| word.bbox)
                .reduce(|acc, bbox| acc.union(&bbox))
            {
                lines.push(TextLine {
                    text: text_line.to_string().trim().to_string(),
                    bbox: line_bbox,
                    words,
                });
            }
        }
        Ok(lines)
    }

    fn word_span(word: &str, rect: &rten_imageproc::Rect) -> Option<TextSpan> {
        let word = word.trim();
        if word.is_empty() {
            None
        } else {
            Some(TextSpan {
                text: word.to_string(),
                bbox: Self::rect_to_bbox(rect),
                confidence: 1.0,
            })
        }
    }
}

impl<'a> OcrPlugin for OcrsPlugin<'a> {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn creator_tag(&self) -> String {
        format!("ocrs (ocrpipe {})", env!("CARGO_PKG_VERSION"))
    }

    fn languages(&self) -> BTreeSet<LanguageCode> {
        BTreeSet::from([LanguageCode::from(Self::SUPPORTED_LANGUAGE.to_string())])
    }

    fn report_concurrency_limit(&self) -> usize {
        Self::CONCURRENCY_LIMIT
    }

    async fn warm_up(&self, language: &LanguageCode) -> AppResult<()> {
        Self::check_language(language)
    }

    async fn recognize(
        &self,
        page: &PageImage,
        language: &LanguageCode,
    ) -> AppResult<RecognitionResult> {
        Self::check_language(language)?;
        tracing::debug!(page = page.page_number, "Running ocrs");
        let lines = self.recognize_lines(page)?;
        Ok(RecognitionResult::from_lines(page.geometry(), lines))
    }

    async fn close(self) -> AppResult<()> {
        Ok(())
    }
}
