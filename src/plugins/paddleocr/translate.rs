use crate::common_types::BoundingBox;
use crate::errors::AppError;
use crate::plugins::paddleocr::native::{PaddleOcrNativeOutput, PaddleOcrServingResponse};
use crate::plugins::paddleocr::PLUGIN_NAME;
use crate::recognition::{
    OrientationConfidence, PageGeometry, RecognitionResult, TextLine, TextSpan,
};
use crate::AppResult;

/// Unwraps a serving response into the output for the page.
/// A response without results is a blank page.
pub fn translate_response(
    response: PaddleOcrServingResponse,
    page: &PageGeometry,
) -> AppResult<RecognitionResult> {
    match first_page_result(response)? {
        Some(native) => translate_result(&native, page),
        None => Ok(RecognitionResult::empty(*page)),
    }
}

/// Reads the orientation class out of a serving response.
/// No classification in the response means upright with no confidence.
pub fn translate_orientation(
    response: PaddleOcrServingResponse,
) -> AppResult<OrientationConfidence> {
    let Some(classified) =
        first_page_result(response)?.and_then(|native| native.doc_preprocessor_res)
    else {
        return Ok(OrientationConfidence::default());
    };
    if classified.angle < 0 {
        return Ok(OrientationConfidence::default());
    }
    let score = classified.score.unwrap_or(0.0);
    u16::try_from(classified.angle)
        .ok()
        .and_then(|angle| OrientationConfidence::from_score(angle, score))
        .ok_or_else(|| {
            AppError::result_translation(
                PLUGIN_NAME,
                format!(
                    "invalid orientation: angle {}, score {score}",
                    classified.angle
                ),
            )
        })
}

fn first_page_result(
    response: PaddleOcrServingResponse,
) -> AppResult<Option<PaddleOcrNativeOutput>> {
    if response.error_code != 0 {
        return Err(AppError::engine_invocation(
            PLUGIN_NAME,
            format!(
                "serving error {}: {} (log id: {})",
                response.error_code,
                response.error_msg,
                response.log_id.as_deref().unwrap_or("none")
            ),
        ));
    }
    Ok(response
        .result
        .and_then(|result| result.ocr_results.into_iter().next())
        .map(|page_result| page_result.pruned_result))
}

/// Maps native PaddleOCR output to page lines and words.
pub fn translate_result(
    native: &PaddleOcrNativeOutput,
    page: &PageGeometry,
) -> AppResult<RecognitionResult> {
    if native.rec_texts.is_empty() {
        return Ok(RecognitionResult::empty(*page));
    }

    if native.rec_scores.len() != native.rec_texts.len()
        || native.rec_boxes.len() != native.rec_texts.len()
    {
        return Err(AppError::result_translation(
            PLUGIN_NAME,
            format!(
                "rec_texts, rec_scores and rec_boxes lengths differ: {}, {}, {}",
                native.rec_texts.len(),
                native.rec_scores.len(),
                native.rec_boxes.len()
            ),
        ));
    }

    if let Some(score) = native.rec_scores.iter().find(|score| !score.is_finite()) {
        return Err(AppError::result_translation(
            PLUGIN_NAME,
            format!("invalid recognition score: {score}"),
        ));
    }

    let page_width = page.width as f32;
    let page_height = page.height as f32;
    let has_word_boxes = check_word_boxes(native)?;

    let mut lines = Vec::with_capacity(native.rec_texts.len());
    for (index, ((text, score), rec_box)) in native
        .rec_texts
        .iter()
        .zip(&native.rec_scores)
        .zip(&native.rec_boxes)
        .enumerate()
    {
        if text.trim().is_empty() {
            continue;
        }

        let [x1, y1, x2, y2] = *rec_box;
        let Some(line_bbox) = BoundingBox::non_degenerate(x1 as f32, y1 as f32, x2 as f32, y2 as f32)
            .and_then(|bbox| bbox.clamp_to(page_width, page_height))
        else {
            continue;
        };
        let confidence = (*score as f32).clamp(0.0, 1.0);

        let line_words = if has_word_boxes && !native.text_word[index].is_empty() {
            Some((&native.text_word[index], &native.text_word_region[index]))
        } else {
            None
        };

        let words: Vec<TextSpan> = match line_words {
            Some((tokens, regions)) => tokens
                .iter()
                .zip(regions)
                .filter_map(|(token, quad)| {
                    let token = token.trim();
                    if token.is_empty() {
                        return None;
                    }
                    quad_to_bbox(quad)
                        .and_then(|bbox| bbox.clamp_to(page_width, page_height))
                        .map(|bbox| TextSpan {
                            text: token.to_string(),
                            bbox,
                            confidence,
                        })
                })
                .collect(),
            None => vec![TextSpan {
                text: text.clone(),
                bbox: line_bbox,
                confidence,
            }],
        };

        if !words.is_empty() {
            lines.push(TextLine {
                text: text.clone(),
                bbox: line_bbox,
                words,
            });
        }
    }

    let skew_degrees = if native.dt_polys.is_empty() {
        None
    } else {
        Some(estimate_skew_degrees(&native.dt_polys))
    };

    Ok(RecognitionResult::from_lines(*page, lines).with_skew_degrees(skew_degrees))
}

/// Word boxes are all-or-nothing: one token list and one region list per
/// line, and one quad per token. Returns whether they are present.
fn check_word_boxes(native: &PaddleOcrNativeOutput) -> AppResult<bool> {
    if native.text_word.is_empty() && native.text_word_region.is_empty() {
        return Ok(false);
    }
    if native.text_word.len() != native.rec_texts.len()
        || native.text_word_region.len() != native.rec_texts.len()
    {
        return Err(AppError::result_translation(
            PLUGIN_NAME,
            format!(
                "text_word and text_word_region do not match rec_texts: {}, {}, {}",
                native.text_word.len(),
                native.text_word_region.len(),
                native.rec_texts.len()
            ),
        ));
    }
    if let Some((index, (tokens, regions))) = native
        .text_word
        .iter()
        .zip(&native.text_word_region)
        .enumerate()
        .find(|(_, (tokens, regions))| tokens.len() != regions.len())
    {
        return Err(AppError::result_translation(
            PLUGIN_NAME,
            format!(
                "line {index} has {} word tokens but {} word regions",
                tokens.len(),
                regions.len()
            ),
        ));
    }
    Ok(true)
}

/// Axis-aligned box around a polygon, `None` when it has no area.
pub fn quad_to_bbox(quad: &[[f64; 2]]) -> Option<BoundingBox> {
    if quad.is_empty() {
        return None;
    }
    let (left, top, right, bottom) = quad.iter().fold(
        (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
        |(left, top, right, bottom), [x, y]| {
            (left.min(*x), top.min(*y), right.max(*x), bottom.max(*y))
        },
    );
    BoundingBox::non_degenerate(left as f32, top as f32, right as f32, bottom as f32)
}

/// Median angle in degrees of the top edges of detected text polygons.
pub fn estimate_skew_degrees(polygons: &[Vec<[f64; 2]>]) -> f64 {
    let mut angles: Vec<f64> = polygons
        .iter()
        .filter(|polygon| polygon.len() >= 2)
        .filter_map(|polygon| {
            let dx = polygon[1][0] - polygon[0][0];
            let dy = polygon[1][1] - polygon[0][1];
            if dx.abs() < 1.0 {
                None
            } else {
                Some(dy.atan2(dx).to_degrees())
            }
        })
        .collect();

    if angles.is_empty() {
        return 0.0;
    }

    angles.sort_by(|a, b| a.total_cmp(b));
    let mid = angles.len() / 2;
    if angles.len() % 2 == 0 {
        (angles[mid - 1] + angles[mid]) / 2.0
    } else {
        angles[mid]
    }
}
