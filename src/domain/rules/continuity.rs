//! Pairwise continuity scoring between adjacent frames

use std::collections::BTreeSet;

use crate::domain::errors::DomainError;
use crate::domain::model::{
    ContinuityComponents, ContinuityScore, ContinuityTier, ContinuityWeights, FrameAnalysisRecord,
    RecommendationPolicy, ValidationConfig, DEFAULT_PROBLEM_FRAME_THRESHOLD, RATING_MAX, RATING_MIN,
};

/// Stateless comparator; the first argument of [`compare`](Self::compare) is the earlier frame
#[derive(Debug, Clone, Copy)]
pub struct ContinuityComparator {
    weights: ContinuityWeights,
    threshold: f64,
    policy: RecommendationPolicy,
}

impl Default for ContinuityComparator {
    fn default() -> Self {
        Self::new(ContinuityWeights::default())
    }
}

impl ContinuityComparator {
    /// Comparator with the default threshold and tier policy
    pub fn new(weights: ContinuityWeights) -> Self {
        Self {
            weights,
            threshold: DEFAULT_PROBLEM_FRAME_THRESHOLD,
            policy: RecommendationPolicy::default(),
        }
    }

    /// Comparator whose weights and tiers follow `config`
    pub fn from_config(config: &ValidationConfig) -> Self {
        Self {
            weights: *config.weights(),
            threshold: config.problem_frame_threshold(),
            policy: *config.policy(),
        }
    }

    pub fn weights(&self) -> &ContinuityWeights {
        &self.weights
    }

    /// Score the continuity from `prev` to `curr`
    ///
    /// The value is the weight-normalized sum of the three sub-scores, so identical
    /// records score exactly 1.0 and fully divergent records exactly 0.0.
    pub fn compare(
        &self,
        prev: &FrameAnalysisRecord,
        curr: &FrameAnalysisRecord,
    ) -> Result<ContinuityScore, DomainError> {
        let color_similarity = Self::color_similarity(prev, curr)?;
        let (object_stability, missing_objects, new_objects) = Self::object_stability(prev, curr);
        let rating_similarity = Self::rating_similarity(prev, curr);

        let w = &self.weights;
        let weighted = w.object_stability * object_stability
            + w.color_distance * color_similarity
            + w.rating_delta * rating_similarity;
        let value = (weighted / w.total()).clamp(0.0, 1.0);

        Ok(ContinuityScore {
            from_index: prev.index,
            to_index: curr.index,
            value,
            tier: ContinuityTier::classify(value, self.threshold, &self.policy),
            components: ContinuityComponents {
                object_stability,
                color_similarity,
                rating_similarity,
            },
            missing_objects,
            new_objects,
        })
    }

    /// Jaccard overlap of the two label sets, with the labels that left and entered
    ///
    /// Two frames without any detected objects are treated as fully stable.
    pub fn object_stability(
        prev: &FrameAnalysisRecord,
        curr: &FrameAnalysisRecord,
    ) -> (f64, Vec<String>, Vec<String>) {
        let before = prev.label_set();
        let after = curr.label_set();

        let missing: Vec<String> = before.difference(&after).map(|s| s.to_string()).collect();
        let new: Vec<String> = after.difference(&before).map(|s| s.to_string()).collect();

        let union: BTreeSet<&str> = before.union(&after).copied().collect();
        if union.is_empty() {
            return (1.0, missing, new);
        }
        let shared = before.intersection(&after).count();
        (shared as f64 / union.len() as f64, missing, new)
    }

    /// One minus the mean normalized distance of rank-aligned palette entries
    pub fn color_similarity(
        prev: &FrameAnalysisRecord,
        curr: &FrameAnalysisRecord,
    ) -> Result<f64, DomainError> {
        if prev.color_palette.len() != curr.color_palette.len() {
            return Err(DomainError::MisalignedPalette {
                from_index: prev.index,
                to_index: curr.index,
                from_len: prev.color_palette.len(),
                to_len: curr.color_palette.len(),
            });
        }
        if prev.color_palette.is_empty() {
            return Ok(1.0);
        }

        let total: f64 = prev
            .color_palette
            .iter()
            .zip(&curr.color_palette)
            .map(|(a, b)| a.normalized_distance(b))
            .sum();
        let mean = total / prev.color_palette.len() as f64;
        Ok((1.0 - mean).clamp(0.0, 1.0))
    }

    /// One minus the absolute rating change over the full rating span
    pub fn rating_similarity(prev: &FrameAnalysisRecord, curr: &FrameAnalysisRecord) -> f64 {
        let delta = (prev.overall_rating - curr.overall_rating).abs();
        (1.0 - delta / (RATING_MAX - RATING_MIN)).clamp(0.0, 1.0)
    }
}
