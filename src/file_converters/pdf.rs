use crate::recognition::RecognitionResult;
use crate::AppResult;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct PdfInfo {
    pub pages: Vec<PdfPageInfo>,
}

/// A PDF page with its size in points and its raster.
#[derive(Debug, Clone)]
pub struct PdfPageInfo {
    pub width_points: f32,
    pub height_points: f32,
    pub page_as_image: image::DynamicImage,
    pub text_layer: Option<RecognitionResult>,
}

impl PdfPageInfo {
    /// DPI of the raster relative to the page width.
    pub fn dpi(&self) -> f32 {
        if self.width_points > 0.0 {
            self.page_as_image.width() as f32 * 72.0 / self.width_points
        } else {
            72.0
        }
    }
}

pub trait PdfToImage {
    fn convert_to_images(&self, pdf_bytes: bytes::Bytes) -> AppResult<PdfInfo>;

    /// Builds a PDF from page images, placing recognized words as invisible text.
    fn images_to_pdf(
        &self,
        pdf_info: PdfInfo,
        text_layer_font: Option<&Path>,
    ) -> AppResult<bytes::Bytes>;
}
