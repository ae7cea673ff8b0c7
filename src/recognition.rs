use crate::common_types::BoundingBox;
use serde::{Deserialize, Serialize};

/// A rasterized page handed to an OCR plugin for a single recognition call.
#[derive(Debug, Clone)]
pub struct PageImage {
    pub page_number: usize,
    pub image: image::DynamicImage,
    pub dpi: f32,
}

impl PageImage {
    pub fn new(page_number: usize, image: image::DynamicImage, dpi: f32) -> Self {
        Self {
            page_number,
            image,
            dpi,
        }
    }

    pub fn geometry(&self) -> PageGeometry {
        PageGeometry {
            page_number: self.page_number,
            width: self.image.width(),
            height: self.image.height(),
            dpi: self.dpi,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PageGeometry {
    pub page_number: usize,
    pub width: u32,
    pub height: u32,
    pub dpi: f32,
}

/// Page rotation suggested by an engine, as one of 0, 90, 180 or 270 degrees.
/// Confidence runs from 0 (no opinion) to 15.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct OrientationConfidence {
    pub angle: u16,
    pub confidence: f32,
}

impl OrientationConfidence {
    pub const ANGLES: [u16; 4] = [0, 90, 180, 270];
    pub const MAX_CONFIDENCE: f32 = 15.0;

    /// Scales a classifier probability onto the confidence range.
    pub fn from_score(angle: u16, score: f64) -> Option<Self> {
        if !Self::ANGLES.contains(&angle) || !score.is_finite() {
            return None;
        }
        Some(Self {
            angle,
            confidence: score.clamp(0.0, 1.0) as f32 * Self::MAX_CONFIDENCE,
        })
    }
}

/// A recognized word (or a whole line when the engine has no word boxes).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TextSpan {
    pub text: String,
    pub bbox: BoundingBox,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TextLine {
    pub text: String,
    pub bbox: BoundingBox,
    pub words: Vec<TextSpan>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RecognitionResult {
    pub page: PageGeometry,
    pub lines: Vec<TextLine>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skew_degrees: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<OrientationConfidence>,
}

impl RecognitionResult {
    pub fn empty(page: PageGeometry) -> Self {
        Self {
            page,
            lines: Vec::new(),
            text: String::new(),
            skew_degrees: None,
            orientation: None,
        }
    }

    pub fn from_lines(page: PageGeometry, lines: Vec<TextLine>) -> Self {
        let text = lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<&str>>()
            .join("\n");
        Self {
            page,
            lines,
            text,
            skew_degrees: None,
            orientation: None,
        }
    }

    pub fn with_skew_degrees(self, skew_degrees: Option<f64>) -> Self {
        Self {
            skew_degrees,
            ..self
        }
    }

    pub fn with_orientation(self, orientation: Option<OrientationConfidence>) -> Self {
        Self {
            orientation,
            ..self
        }
    }

    /// All recognized spans in reading order.
    pub fn spans(&self) -> impl Iterator<Item = &TextSpan> {
        self.lines.iter().flat_map(|line| line.words.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
