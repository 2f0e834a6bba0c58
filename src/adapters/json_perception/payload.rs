//! Provider dump format and its normalization into frame records

use serde::Deserialize;
use serde_json::Value;

use crate::domain::model::*;
use crate::error::PerceptionError;

/// One provider dump: vision output plus the generative assessment
#[derive(Debug, Deserialize)]
pub struct ProviderPayload {
    #[serde(default)]
    pub vision: VisionPayload,
    #[serde(default)]
    pub assessment: Option<Value>,
    /// Set when the provider call itself failed and only the error was recorded
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VisionPayload {
    #[serde(default)]
    pub objects: Vec<ObjectPayload>,
    #[serde(default)]
    pub colors: Vec<ColorPayload>,
}

#[derive(Debug, Deserialize)]
pub struct ObjectPayload {
    pub name: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub bounding_box: Vec<VertexPayload>,
}

#[derive(Debug, Deserialize)]
pub struct VertexPayload {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

#[derive(Debug, Deserialize)]
pub struct ColorPayload {
    pub color: [f64; 3],
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub pixel_fraction: f64,
}

/// Knobs applied while normalizing a dump
#[derive(Debug, Clone, Copy)]
pub struct Normalization {
    pub palette_size: usize,
    pub min_object_confidence: f64,
}

impl ProviderPayload {
    /// Normalize this dump into the record for frame `index`
    ///
    /// `frame` names the source in error messages.
    pub fn into_record(
        self,
        index: usize,
        frame: &str,
        normalization: Normalization,
    ) -> Result<FrameAnalysisRecord, PerceptionError> {
        if let Some(error) = self.error {
            return Err(PerceptionError::malformed(
                frame,
                format!("provider reported an error: {}", error),
            ));
        }

        let assessment = match self.assessment {
            Some(value) => unwrap_raw_analysis(value, frame)?,
            None => return Err(PerceptionError::malformed(frame, "missing assessment")),
        };

        let overall_rating = assessment
            .get("overall_rating")
            .ok_or_else(|| PerceptionError::malformed(frame, "missing overall_rating"))
            .and_then(|value| parse_rating(value, frame))?;

        let detected_objects = self
            .vision
            .objects
            .into_iter()
            .filter(|object| {
                object
                    .confidence
                    .map_or(true, |confidence| confidence >= normalization.min_object_confidence)
            })
            .filter_map(normalize_object)
            .collect();

        Ok(FrameAnalysisRecord {
            index,
            detected_objects,
            color_palette: normalize_palette(self.vision.colors, normalization.palette_size),
            composition_quality: descriptor(&assessment, "composition_quality"),
            lighting_assessment: descriptor(&assessment, "lighting_assessment"),
            depth_perspective: descriptor(&assessment, "depth_perspective"),
            overall_rating,
        })
    }
}

fn normalize_object(object: ObjectPayload) -> Option<DetectedObject> {
    let label = object.name.trim().to_lowercase();
    if label.is_empty() {
        return None;
    }

    let vertices: Vec<(f64, f64)> = object.bounding_box.iter().map(|v| (v.x, v.y)).collect();
    let mut detected = DetectedObject::new(label);
    detected.confidence = object.confidence;
    detected.bounding_box = BoundingBox::from_vertices(&vertices);
    Some(detected)
}

/// Colors by descending score, ties keep provider order, truncated to `palette_size`
pub fn normalize_palette(mut colors: Vec<ColorPayload>, palette_size: usize) -> Vec<Rgb> {
    colors.sort_by(|a, b| b.score.total_cmp(&a.score));
    colors
        .into_iter()
        .take(palette_size)
        .map(|c| Rgb::new(channel(c.color[0]), channel(c.color[1]), channel(c.color[2])))
        .collect()
}

fn channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

/// Accepts `8`, `"8"`, `"7.5/10"`; anything outside [RATING_MIN, RATING_MAX] is rejected
pub fn parse_rating(value: &Value, frame: &str) -> Result<f64, PerceptionError> {
    let rating = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s
            .split('/')
            .next()
            .and_then(|head| head.trim().parse::<f64>().ok()),
        _ => None,
    }
    .ok_or_else(|| PerceptionError::malformed(frame, format!("unreadable overall_rating: {}", value)))?;

    if !rating.is_finite() || !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(PerceptionError::malformed(
            frame,
            format!("overall_rating {} outside [{}, {}]", rating, RATING_MIN, RATING_MAX),
        ));
    }
    Ok(rating)
}

/// `{ "raw_analysis": "<json text>" }` is replaced by the parsed text
fn unwrap_raw_analysis(value: Value, frame: &str) -> Result<Value, PerceptionError> {
    let raw = value
        .get("raw_analysis")
        .and_then(Value::as_str)
        .map(str::to_owned);
    match raw {
        Some(raw) => serde_json::from_str(strip_code_fences(&raw)).map_err(|e| {
            PerceptionError::malformed(frame, format!("raw_analysis is not JSON: {}", e))
        }),
        None if value.is_object() => Ok(value),
        None => Err(PerceptionError::malformed(frame, "assessment is not an object")),
    }
}

/// Strip markdown code fences around a model response
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Qualitative field as text; non-string values are kept as compact JSON
fn descriptor(assessment: &Value, key: &str) -> String {
    match assessment.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
    }
}
