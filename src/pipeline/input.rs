use crate::errors::AppError;
use crate::file_converters::FileConverters;
use crate::recognition::PageImage;
use crate::AppResult;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Image,
    Pdf,
}

impl InputKind {
    pub fn detect(input: &Path) -> AppResult<Self> {
        let media_type = mime_guess::from_path(input).first();
        match media_type {
            Some(media_type) if media_type.type_() == mime::IMAGE => Ok(InputKind::Image),
            Some(media_type) if media_type == mime::APPLICATION_PDF => Ok(InputKind::Pdf),
            other => Err(AppError::UnsupportedInput {
                file_path: input.display().to_string(),
                message: format!(
                    "expected an image or a PDF, got {}",
                    other
                        .map(|media_type| media_type.to_string())
                        .unwrap_or_else(|| "unknown media type".to_string())
                ),
            }),
        }
    }
}

/// A page raster together with the physical page size it came from.
#[derive(Debug, Clone)]
pub struct SourcePage {
    pub image: PageImage,
    pub width_points: f32,
    pub height_points: f32,
}

impl SourcePage {
    fn from_image(page_number: usize, image: image::DynamicImage, dpi: f32) -> Self {
        let width_points = image.width() as f32 * 72.0 / dpi;
        let height_points = image.height() as f32 * 72.0 / dpi;
        Self {
            image: PageImage::new(page_number, image, dpi),
            width_points,
            height_points,
        }
    }
}

pub async fn load_pages(
    input: &Path,
    input_kind: InputKind,
    image_dpi: f32,
    converters: &FileConverters,
) -> AppResult<Vec<SourcePage>> {
    if !(image_dpi.is_finite() && image_dpi > 0.0) {
        return Err(AppError::PluginConfigError {
            message: format!("Image DPI must be positive, got {image_dpi}"),
        });
    }
    let input_bytes = tokio::fs::read(input).await?;
    tracing::debug!(
        input = %input.display(),
        size = input_bytes.len(),
        "Loading input"
    );
    match input_kind {
        InputKind::Image => {
            let image = image::load_from_memory(&input_bytes)?;
            Ok(vec![SourcePage::from_image(0, image, image_dpi)])
        }
        InputKind::Pdf => {
            let pdf_image_converter =
                converters
                    .pdf_image_converter
                    .as_ref()
                    .ok_or_else(|| AppError::UnsupportedInput {
                        file_path: input.display().to_string(),
                        message: "PDF rendering is not available (pdfium library not found)"
                            .to_string(),
                    })?;
            let pdf_info = pdf_image_converter.convert_to_images(input_bytes.into())?;
            Ok(pdf_info
                .pages
                .into_iter()
                .enumerate()
                .map(|(page_number, page)| {
                    let dpi = page.dpi();
                    SourcePage {
                        image: PageImage::new(page_number, page.page_as_image, dpi),
                        width_points: page.width_points,
                        height_points: page.height_points,
                    }
                })
                .collect())
        }
    }
}

#[allow(unused_imports)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_input_kind() -> AppResult<()> {
        assert_eq!(InputKind::detect(Path::new("scan.png"))?, InputKind::Image);
        assert_eq!(InputKind::detect(Path::new("scan.JPG"))?, InputKind::Image);
        assert_eq!(InputKind::detect(Path::new("book.pdf"))?, InputKind::Pdf);
        assert!(matches!(
            InputKind::detect(Path::new("notes.txt")),
            Err(AppError::UnsupportedInput { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_image_page_size() -> AppResult<()> {
        let temp_dir = tempfile::tempdir()?;
        let input = temp_dir.path().join("page.png");
        image::RgbImage::new(600, 300).save(&input)?;

        let pages = load_pages(&input, InputKind::Image, 300.0, &FileConverters::new()).await?;
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].image.page_number, 0);
        assert_eq!(pages[0].image.dpi, 300.0);
        assert!((pages[0].width_points - 144.0).abs() < 0.01);
        assert!((pages[0].height_points - 72.0).abs() < 0.01);
        Ok(())
    }

    #[tokio::test]
    async fn test_pdf_without_renderer_is_unsupported() -> AppResult<()> {
        let temp_dir = tempfile::tempdir()?;
        let input = temp_dir.path().join("doc.pdf");
        tokio::fs::write(&input, b"%PDF-1.4").await?;

        let result = load_pages(&input, InputKind::Pdf, 300.0, &FileConverters::new()).await;
        assert!(matches!(result, Err(AppError::UnsupportedInput { .. })));
        Ok(())
    }
}
