use crate::errors::AppError;
use crate::file_converters::pdf::{PdfInfo, PdfPageInfo, PdfToImage};
use crate::recognition::RecognitionResult;
use crate::AppResult;
use bytes::Bytes;
use pdfium_render::prelude::*;
use std::path::Path;

pub struct PdfImageConverter {
    pdfium: Pdfium,
}

impl PdfImageConverter {
    const RENDER_TARGET_WIDTH: i32 = 2000;
    const RENDER_MAX_HEIGHT: i32 = 3000;

    pub fn new() -> AppResult<Self> {
        let executable = std::env::current_exe()?;
        let current_dir = executable
            .parent()
            .ok_or(AppError::SystemError {
                message: "No parent directory for executable".to_string(),
            })?
            .to_path_buf();

        let bindings = Pdfium::bind_to_library(
            // Attempt to bind to a pdfium library in the current working directory...
            Pdfium::pdfium_platform_library_name_at_path("./"),
        )
        .or_else(|_| Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./lib")))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                &current_dir
                    .parent()
                    .map(|p| p.join("lib"))
                    .unwrap_or(current_dir.clone()),
            ))
        })
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&current_dir))
        })
        .or_else(|_| Pdfium::bind_to_system_library())?;

        let pdfium = Pdfium::new(bindings);
        Ok(Self { pdfium })
    }

    fn add_text_layer(
        page: &mut PdfPage,
        result: &RecognitionResult,
        font: PdfFontToken,
        width_points: f32,
        height_points: f32,
    ) -> AppResult<usize> {
        if result.page.width == 0 || result.page.height == 0 {
            return Ok(0);
        }
        let scale_x = width_points / result.page.width as f32;
        let scale_y = height_points / result.page.height as f32;
        let mut words_placed = 0;
        for word in result.spans() {
            let font_size = PdfPoints::new((word.bbox.height() * scale_y).max(1.0));
            let x = PdfPoints::new(word.bbox.left * scale_x);
            let y = PdfPoints::new(height_points - word.bbox.bottom * scale_y);
            let mut object =
                page.objects_mut()
                    .create_text_object(x, y, &word.text, font, font_size)?;
            if let Some(text_object) = object.as_text_object_mut() {
                text_object.set_render_mode(PdfPageTextRenderMode::Invisible)?;
            }
            words_placed += 1;
        }
        Ok(words_placed)
    }
}

impl PdfToImage for PdfImageConverter {
    fn convert_to_images(&self, pdf_bytes: Bytes) -> AppResult<PdfInfo> {
        let render_config = PdfRenderConfig::new()
            .set_target_width(Self::RENDER_TARGET_WIDTH)
            .set_maximum_height(Self::RENDER_MAX_HEIGHT);
        let document = self
            .pdfium
            .load_pdf_from_byte_vec(pdf_bytes.to_vec(), None)?;
        let mut pdf_info = PdfInfo { pages: Vec::new() };
        for page in document.pages().iter() {
            let image = page.render_with_config(&render_config)?.as_image();
            let page_info = PdfPageInfo {
                height_points: page.height().value,
                width_points: page.width().value,
                page_as_image: image,
                text_layer: None,
            };
            pdf_info.pages.push(page_info);
        }
        Ok(pdf_info)
    }

    fn images_to_pdf(&self, pdf_info: PdfInfo, text_layer_font: Option<&Path>) -> AppResult<Bytes> {
        let mut document = self.pdfium.create_new_pdf()?;
        let font = match text_layer_font {
            Some(font_path) => document
                .fonts_mut()
                .load_true_type_from_file(font_path, true)?,
            None => document.fonts_mut().helvetica(),
        };
        for src_page in pdf_info.pages {
            let width = PdfPoints::new(src_page.width_points);
            let height = PdfPoints::new(src_page.height_points);
            let mut page = document
                .pages_mut()
                .create_page_at_end(PdfPagePaperSize::from_points(width, height))?;
            let object = PdfPageImageObject::new_with_size(
                &document,
                &src_page.page_as_image,
                width,
                height,
            )?;
            page.objects_mut().add_image_object(object)?;
            if let Some(ref result) = src_page.text_layer {
                let words_placed = Self::add_text_layer(
                    &mut page,
                    result,
                    font,
                    src_page.width_points,
                    src_page.height_points,
                )?;
                tracing::debug!(
                    page = result.page.page_number,
                    words_placed,
                    "Text layer added"
                );
            }
        }
        Ok(document.save_to_bytes()?.into())
    }
}
