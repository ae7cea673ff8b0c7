use serde::{Deserialize, Serialize};

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PaddleOcrServingRequest {
    pub file: String,
    pub file_type: u8,
    pub use_doc_orientation_classify: bool,
    pub use_doc_unwarping: bool,
    pub use_textline_orientation: bool,
    pub return_word_box: bool,
    pub visualize: bool,
}

impl PaddleOcrServingRequest {
    /// `fileType` value for image payloads.
    pub const IMAGE_FILE_TYPE: u8 = 1;

    pub fn for_image(
        base64_image: String,
        use_textline_orientation: bool,
        return_word_box: bool,
    ) -> Self {
        Self {
            file: base64_image,
            file_type: Self::IMAGE_FILE_TYPE,
            use_doc_orientation_classify: false,
            use_doc_unwarping: false,
            use_textline_orientation,
            return_word_box,
            visualize: false,
        }
    }

    /// Asks only for the page orientation class in `doc_preprocessor_res`.
    pub fn for_orientation(base64_image: String) -> Self {
        Self {
            file: base64_image,
            file_type: Self::IMAGE_FILE_TYPE,
            use_doc_orientation_classify: true,
            use_doc_unwarping: false,
            use_textline_orientation: false,
            return_word_box: false,
            visualize: false,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PaddleOcrServingResponse {
    #[serde(default)]
    pub log_id: Option<String>,
    pub error_code: i64,
    #[serde(default)]
    pub error_msg: String,
    #[serde(default)]
    pub result: Option<PaddleOcrServingResult>,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PaddleOcrServingResult {
    #[serde(default)]
    pub ocr_results: Vec<PaddleOcrServingPage>,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PaddleOcrServingPage {
    pub pruned_result: PaddleOcrNativeOutput,
}

/// Per-page output of the PaddleOCR text pipeline.
///
/// `rec_boxes` are `[x1, y1, x2, y2]` line boxes aligned with `rec_texts` and
/// `rec_scores`. Word boxes (`text_word`, `text_word_region`) are only present
/// when the engine was asked for them; each region is a quad of points.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct PaddleOcrNativeOutput {
    #[serde(default)]
    pub rec_texts: Vec<String>,
    #[serde(default)]
    pub rec_scores: Vec<f64>,
    #[serde(default)]
    pub rec_boxes: Vec<[f64; 4]>,
    #[serde(default)]
    pub dt_polys: Vec<Vec<[f64; 2]>>,
    #[serde(default)]
    pub text_word: Vec<Vec<String>>,
    #[serde(default)]
    pub text_word_region: Vec<Vec<Vec<[f64; 2]>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_preprocessor_res: Option<PaddleOcrDocPreprocessorOutput>,
}

/// Document preprocessing output. `angle` is `-1` when orientation
/// classification was not requested.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct PaddleOcrDocPreprocessorOutput {
    #[serde(default = "PaddleOcrDocPreprocessorOutput::not_classified")]
    pub angle: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl PaddleOcrDocPreprocessorOutput {
    fn not_classified() -> i64 {
        -1
    }
}

/// Body of the serving `/health` endpoint.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaddleOcrHealthResponse {
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub version: Option<String>,
}
