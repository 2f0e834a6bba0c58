// Domain models - Core types and data structures

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Lowest rating a generative provider may assign to a frame
pub const RATING_MIN: f64 = 0.0;

/// Highest rating a generative provider may assign to a frame
pub const RATING_MAX: f64 = 10.0;

/// Number of dominant colors kept per frame unless configured otherwise
pub const DEFAULT_PALETTE_SIZE: usize = 4;

/// Allowed drift of the continuity weight sum away from 1.0
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Problem-frame threshold used when the caller does not override it
pub const DEFAULT_PROBLEM_FRAME_THRESHOLD: f64 = 0.7;

/// 8-bit RGB color, serialized as `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Euclidean distance to `other` in RGB space, scaled so that black-to-white is 1.0
    pub fn normalized_distance(&self, other: &Rgb) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        let max_squared = 3.0 * 255.0 * 255.0;
        ((dr * dr + dg * dg + db * db) / max_squared).sqrt()
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        [color.r, color.g, color.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Axis-aligned bounding region in normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    /// Fold polygon vertices into their enclosing box. Returns `None` for an empty polygon.
    pub fn from_vertices(vertices: &[(f64, f64)]) -> Option<Self> {
        let (first, rest) = vertices.split_first()?;
        let init = Self {
            x_min: first.0,
            y_min: first.1,
            x_max: first.0,
            y_max: first.1,
        };
        Some(rest.iter().fold(init, |acc, &(x, y)| Self {
            x_min: acc.x_min.min(x),
            y_min: acc.y_min.min(y),
            x_max: acc.x_max.max(x),
            y_max: acc.y_max.max(y),
        }))
    }
}

/// Labeled entity reported by an object-detection provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

impl DetectedObject {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            confidence: None,
            bounding_box: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_bounding_box(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = Some(bounding_box);
        self
    }
}

/// Normalized perception output for one frame of a sequence
///
/// The qualitative descriptors are opaque to the engine: they are carried into the
/// report untouched and never parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameAnalysisRecord {
    /// Zero-based position in the sequence
    pub index: usize,
    #[serde(default)]
    pub detected_objects: Vec<DetectedObject>,
    /// Dominant colors ordered by dominance rank
    #[serde(default)]
    pub color_palette: Vec<Rgb>,
    #[serde(default)]
    pub composition_quality: String,
    #[serde(default)]
    pub lighting_assessment: String,
    #[serde(default)]
    pub depth_perspective: String,
    /// Provider rating in [RATING_MIN, RATING_MAX]
    pub overall_rating: f64,
}

impl FrameAnalysisRecord {
    /// Create a record with no objects, no palette and empty descriptors
    pub fn new(index: usize, overall_rating: f64) -> Self {
        Self {
            index,
            detected_objects: Vec::new(),
            color_palette: Vec::new(),
            composition_quality: String::new(),
            lighting_assessment: String::new(),
            depth_perspective: String::new(),
            overall_rating,
        }
    }

    pub fn with_objects(mut self, objects: Vec<DetectedObject>) -> Self {
        self.detected_objects = objects;
        self
    }

    /// Shorthand for label-only objects
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.detected_objects = labels.into_iter().map(DetectedObject::new).collect();
        self
    }

    pub fn with_palette(mut self, palette: Vec<Rgb>) -> Self {
        self.color_palette = palette;
        self
    }

    pub fn with_assessments(
        mut self,
        composition_quality: impl Into<String>,
        lighting_assessment: impl Into<String>,
        depth_perspective: impl Into<String>,
    ) -> Self {
        self.composition_quality = composition_quality.into();
        self.lighting_assessment = lighting_assessment.into();
        self.depth_perspective = depth_perspective.into();
        self
    }

    /// Distinct object labels; repeated instances of one label collapse to a single entry
    pub fn label_set(&self) -> BTreeSet<&str> {
        self.detected_objects
            .iter()
            .map(|object| object.label.as_str())
            .collect()
    }

    pub fn validate_rating(&self) -> Result<(), DomainError> {
        if !self.overall_rating.is_finite()
            || self.overall_rating < RATING_MIN
            || self.overall_rating > RATING_MAX
        {
            return Err(DomainError::InvalidRating {
                index: self.index,
                rating: self.overall_rating,
            });
        }
        Ok(())
    }
}

/// Sub-scores of one continuity comparison, each in [0, 1] with 1 meaning unchanged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContinuityComponents {
    pub object_stability: f64,
    pub color_similarity: f64,
    pub rating_similarity: f64,
}

/// The sub-score families a continuity comparison is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinuityFactor {
    ObjectChurn,
    ColorShift,
    RatingDelta,
}

impl fmt::Display for ContinuityFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContinuityFactor::ObjectChurn => write!(f, "object churn"),
            ContinuityFactor::ColorShift => write!(f, "color shift"),
            ContinuityFactor::RatingDelta => write!(f, "rating delta"),
        }
    }
}

/// Continuity between two adjacent frames; immutable once computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuityScore {
    pub from_index: usize,
    pub to_index: usize,
    /// Weighted similarity in [0, 1]
    pub value: f64,
    pub tier: ContinuityTier,
    pub components: ContinuityComponents,
    /// Labels present in the earlier frame only
    #[serde(default)]
    pub missing_objects: Vec<String>,
    /// Labels present in the later frame only
    #[serde(default)]
    pub new_objects: Vec<String>,
}

impl ContinuityScore {
    /// Weighted penalty each factor applied to this score, in fixed factor order
    pub fn penalties(&self, weights: &ContinuityWeights) -> [(ContinuityFactor, f64); 3] {
        [
            (
                ContinuityFactor::ObjectChurn,
                weights.object_stability * (1.0 - self.components.object_stability),
            ),
            (
                ContinuityFactor::ColorShift,
                weights.color_distance * (1.0 - self.components.color_similarity),
            ),
            (
                ContinuityFactor::RatingDelta,
                weights.rating_delta * (1.0 - self.components.rating_similarity),
            ),
        ]
    }

    /// Factor with the largest weighted penalty; ties go to the earlier factor
    pub fn dominant_factor(&self, weights: &ContinuityWeights) -> ContinuityFactor {
        let penalties = self.penalties(weights);
        let mut dominant = penalties[0];
        for candidate in &penalties[1..] {
            if candidate.1 > dominant.1 {
                dominant = *candidate;
            }
        }
        dominant.0
    }
}

/// Relative weight of each continuity sub-score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContinuityWeights {
    pub object_stability: f64,
    pub color_distance: f64,
    pub rating_delta: f64,
}

impl ContinuityWeights {
    /// Create validated weights
    pub fn new(object_stability: f64, color_distance: f64, rating_delta: f64) -> Result<Self, DomainError> {
        let weights = Self {
            object_stability,
            color_distance,
            rating_delta,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn total(&self) -> f64 {
        self.object_stability + self.color_distance + self.rating_delta
    }

    /// Each weight must lie in [0, 1] and together they must sum to 1.0
    pub fn validate(&self) -> Result<(), DomainError> {
        let sum = self.total();
        let in_range = [self.object_stability, self.color_distance, self.rating_delta]
            .iter()
            .all(|w| w.is_finite() && (0.0..=1.0).contains(w));
        if !in_range || !sum.is_finite() || (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(DomainError::InvalidWeights { sum });
        }
        Ok(())
    }
}

impl Default for ContinuityWeights {
    fn default() -> Self {
        Self {
            object_stability: 0.4,
            color_distance: 0.3,
            rating_delta: 0.3,
        }
    }
}

impl FromStr for ContinuityWeights {
    type Err = DomainError;

    /// Parse `object,color,rating`, e.g. `0.5,0.25,0.25`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(DomainError::BadArgs(format!(
                "Invalid weights '{}': expected three comma-separated values (object,color,rating)",
                s
            )));
        }
        let mut values = [0.0; 3];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse::<f64>()
                .map_err(|_| DomainError::BadArgs(format!("Invalid weight value: {}", part)))?;
        }
        Self::new(values[0], values[1], values[2])
    }
}

/// Which frames feed the composition score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepresentativeSet {
    /// Entry and exit frames only
    FirstLast,
    /// Every frame of the sequence
    All,
}

impl Default for RepresentativeSet {
    fn default() -> Self {
        RepresentativeSet::FirstLast
    }
}

impl FromStr for RepresentativeSet {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first-last" | "first_last" | "firstlast" => Ok(RepresentativeSet::FirstLast),
            "all" => Ok(RepresentativeSet::All),
            other => Err(DomainError::BadArgs(format!(
                "Invalid representative set: {}. Valid values: first-last, all",
                other
            ))),
        }
    }
}

impl fmt::Display for RepresentativeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepresentativeSet::FirstLast => write!(f, "first-last"),
            RepresentativeSet::All => write!(f, "all"),
        }
    }
}

/// Thresholds the engine owns for tiers and recommendation rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationPolicy {
    /// Composition score at or above which a clean scene earns a positive summary
    pub strong_composition: f64,
    /// Composition score below which a generic improvement note is emitted
    pub weak_composition: f64,
    /// Continuity at or above which a pair counts as stable
    pub stable_continuity: f64,
    /// Maximum number of problem frames echoed in the key-frame assessments
    pub key_frame_problem_limit: usize,
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self {
            strong_composition: 7.5,
            weak_composition: 6.0,
            stable_continuity: 0.9,
            key_frame_problem_limit: 3,
        }
    }
}

impl RecommendationPolicy {
    pub fn validate(&self) -> Result<(), DomainError> {
        let rating_range = RATING_MIN..=RATING_MAX;
        if !rating_range.contains(&self.strong_composition)
            || !rating_range.contains(&self.weak_composition)
            || self.weak_composition > self.strong_composition
        {
            return Err(DomainError::BadArgs(format!(
                "Invalid composition thresholds: weak {} must not exceed strong {} and both must lie in [{}, {}]",
                self.weak_composition, self.strong_composition, RATING_MIN, RATING_MAX
            )));
        }
        if !(0.0..=1.0).contains(&self.stable_continuity) {
            return Err(DomainError::BadArgs(format!(
                "Invalid stable continuity threshold: {}",
                self.stable_continuity
            )));
        }
        Ok(())
    }
}

/// Immutable engine configuration, validated on construction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationConfig {
    weights: ContinuityWeights,
    problem_frame_threshold: f64,
    representative_set: RepresentativeSet,
    policy: RecommendationPolicy,
}

impl ValidationConfig {
    pub fn new(
        weights: ContinuityWeights,
        problem_frame_threshold: f64,
        representative_set: RepresentativeSet,
    ) -> Result<Self, DomainError> {
        Self::builder()
            .weights(weights)
            .problem_frame_threshold(problem_frame_threshold)
            .representative_set(representative_set)
            .build()
    }

    pub fn builder() -> ValidationConfigBuilder {
        ValidationConfigBuilder::default()
    }

    pub fn weights(&self) -> &ContinuityWeights {
        &self.weights
    }

    pub fn problem_frame_threshold(&self) -> f64 {
        self.problem_frame_threshold
    }

    pub fn representative_set(&self) -> RepresentativeSet {
        self.representative_set
    }

    pub fn policy(&self) -> &RecommendationPolicy {
        &self.policy
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            weights: ContinuityWeights::default(),
            problem_frame_threshold: DEFAULT_PROBLEM_FRAME_THRESHOLD,
            representative_set: RepresentativeSet::default(),
            policy: RecommendationPolicy::default(),
        }
    }
}

/// Builder for [`ValidationConfig`]; all checks run in `build`
#[derive(Debug, Clone)]
pub struct ValidationConfigBuilder {
    weights: ContinuityWeights,
    problem_frame_threshold: f64,
    representative_set: RepresentativeSet,
    policy: RecommendationPolicy,
}

impl Default for ValidationConfigBuilder {
    fn default() -> Self {
        let defaults = ValidationConfig::default();
        Self {
            weights: defaults.weights,
            problem_frame_threshold: defaults.problem_frame_threshold,
            representative_set: defaults.representative_set,
            policy: defaults.policy,
        }
    }
}

impl ValidationConfigBuilder {
    pub fn weights(mut self, weights: ContinuityWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn problem_frame_threshold(mut self, threshold: f64) -> Self {
        self.problem_frame_threshold = threshold;
        self
    }

    pub fn representative_set(mut self, representative_set: RepresentativeSet) -> Self {
        self.representative_set = representative_set;
        self
    }

    pub fn policy(mut self, policy: RecommendationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> Result<ValidationConfig, DomainError> {
        self.weights.validate()?;
        if !self.problem_frame_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.problem_frame_threshold)
        {
            return Err(DomainError::InvalidThreshold(self.problem_frame_threshold));
        }
        self.policy.validate()?;
        Ok(ValidationConfig {
            weights: self.weights,
            problem_frame_threshold: self.problem_frame_threshold,
            representative_set: self.representative_set,
            policy: self.policy,
        })
    }
}

/// Qualitative tier of a continuity value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinuityTier {
    Stable,
    Acceptable,
    Discontinuous,
}

impl ContinuityTier {
    pub fn classify(value: f64, threshold: f64, policy: &RecommendationPolicy) -> Self {
        if value < threshold {
            ContinuityTier::Discontinuous
        } else if value >= policy.stable_continuity {
            ContinuityTier::Stable
        } else {
            ContinuityTier::Acceptable
        }
    }
}

/// Qualitative tier of a composition score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionTier {
    Strong,
    Adequate,
    Weak,
}

impl CompositionTier {
    pub fn classify(score: f64, policy: &RecommendationPolicy) -> Self {
        if score >= policy.strong_composition {
            CompositionTier::Strong
        } else if score >= policy.weak_composition {
            CompositionTier::Adequate
        } else {
            CompositionTier::Weak
        }
    }
}

/// Why a frame's qualitative assessment is echoed in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyFrameRole {
    First,
    Problem,
    Last,
}

/// Qualitative descriptors of a key frame, passed through from perception
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyFrameAssessment {
    pub index: usize,
    pub role: KeyFrameRole,
    pub composition_quality: String,
    pub lighting_assessment: String,
    pub depth_perspective: String,
    pub overall_rating: f64,
}

impl KeyFrameAssessment {
    pub fn from_record(record: &FrameAnalysisRecord, role: KeyFrameRole) -> Self {
        Self {
            index: record.index,
            role,
            composition_quality: record.composition_quality.clone(),
            lighting_assessment: record.lighting_assessment.clone(),
            depth_perspective: record.depth_perspective.clone(),
            overall_rating: record.overall_rating,
        }
    }
}

/// Final output of a scene validation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub frame_count: usize,
    pub continuity_scores: Vec<ContinuityScore>,
    pub average_continuity: f64,
    pub continuity_tier: ContinuityTier,
    /// Ascending indices of frames whose incoming continuity fell below the threshold
    pub problem_frame_indices: Vec<usize>,
    pub composition_score: f64,
    pub composition_tier: CompositionTier,
    /// Blend of average continuity and normalized composition, in [0, 1]
    pub scene_quality: f64,
    pub key_frames: Vec<KeyFrameAssessment>,
    pub recommendations: Vec<String>,
}

impl ValidationReport {
    pub fn issue_count(&self) -> usize {
        self.problem_frame_indices.len()
    }

    pub fn is_clean(&self) -> bool {
        self.problem_frame_indices.is_empty()
    }
}

#[cfg(test)]
mod tests;
