use crate::file_converters::pdf::PdfToImage;

pub mod pdf;

#[cfg(feature = "pdf-render")]
pub mod pdf_image_converter;

pub struct FileConverters {
    pub pdf_image_converter: Option<Box<dyn PdfToImage + 'static>>,
}

impl FileConverters {
    pub fn new() -> Self {
        Self {
            pdf_image_converter: None,
        }
    }

    /// Binds the PDF renderer if the pdfium library can be found.
    #[allow(unused_mut)]
    pub fn init(mut self) -> Self {
        #[cfg(feature = "pdf-render")]
        match pdf_image_converter::PdfImageConverter::new() {
            Ok(pdf_image_converter) => {
                self.pdf_image_converter = Some(Box::new(pdf_image_converter));
            }
            Err(err) => {
                tracing::warn!("PDF rendering is not available: {}", err);
            }
        }
        self
    }
}

impl Default for FileConverters {
    fn default() -> Self {
        Self::new()
    }
}
