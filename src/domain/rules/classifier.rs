//! Threshold classification of problem frames

use std::collections::BTreeSet;

use crate::domain::model::ContinuityScore;

/// Flags the later frame of every pair whose continuity falls below a threshold
pub struct ProblemFrameClassifier;

impl ProblemFrameClassifier {
    /// Ascending indices `i` such that the score ending at `i` is strictly below `threshold`
    ///
    /// A score exactly equal to the threshold is not a problem.
    pub fn classify(scores: &[ContinuityScore], threshold: f64) -> Vec<usize> {
        scores
            .iter()
            .filter(|score| score.value < threshold)
            .map(|score| score.to_index)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
