//! Human-readable guidance derived from scores and classifications

use crate::domain::model::{
    ContinuityFactor, ContinuityScore, ValidationConfig, RATING_MAX, RATING_MIN,
};

/// Everything the generator reads from a report in progress
#[derive(Debug, Clone, Copy)]
pub struct RecommendationContext<'a> {
    pub frame_count: usize,
    pub continuity_scores: &'a [ContinuityScore],
    pub problem_frame_indices: &'a [usize],
    pub composition_score: f64,
    pub config: &'a ValidationConfig,
}

/// Deterministic, priority-ordered rule set
pub struct RecommendationGenerator;

impl RecommendationGenerator {
    /// Rules, in order:
    /// 1. one entry per problem frame, ascending, naming its dominant failing factor
    /// 2. a positive summary when there are no problems and composition is strong
    /// 3. a generic composition note when there are no problems and composition is weak
    ///
    /// Sequences shorter than two frames never yield recommendations.
    pub fn generate(context: &RecommendationContext<'_>) -> Vec<String> {
        if context.frame_count < 2 {
            return Vec::new();
        }

        let policy = context.config.policy();
        let mut recommendations: Vec<String> = context
            .problem_frame_indices
            .iter()
            .map(|&index| Self::problem_frame_note(context, index))
            .collect();

        if recommendations.is_empty() {
            if context.composition_score >= policy.strong_composition {
                recommendations.push(format!(
                    "Scene has consistent continuity and strong composition (composition score {:.1}/10)",
                    context.composition_score
                ));
            } else if context.composition_score < policy.weak_composition {
                recommendations.push(format!(
                    "Composition quality is low (composition score {:.1}/10); review framing, lighting and depth across the scene",
                    context.composition_score
                ));
            }
        }

        recommendations
    }

    fn problem_frame_note(context: &RecommendationContext<'_>, index: usize) -> String {
        let threshold = context.config.problem_frame_threshold();
        let Some(score) = context
            .continuity_scores
            .iter()
            .find(|score| score.to_index == index)
        else {
            return format!(
                "Frame {}: continuity below threshold {:.2}; review the transition into this frame",
                index, threshold
            );
        };

        let prefix = format!(
            "Frame {}: continuity {:.2} below {:.2}",
            index, score.value, threshold
        );
        match score.dominant_factor(context.config.weights()) {
            ContinuityFactor::ObjectChurn => format!(
                "{}, driven by object churn from frame {} ({}); check props and blocking between shots",
                prefix,
                score.from_index,
                Self::describe_churn(score)
            ),
            ContinuityFactor::ColorShift => format!(
                "{}, driven by a color palette shift from frame {}; check lighting and color grading consistency",
                prefix, score.from_index
            ),
            ContinuityFactor::RatingDelta => {
                let delta = (1.0 - score.components.rating_similarity) * (RATING_MAX - RATING_MIN);
                format!(
                    "{}, driven by a {:.1}-point quality rating change from frame {}; check framing and exposure",
                    prefix, delta, score.from_index
                )
            }
        }
    }

    fn describe_churn(score: &ContinuityScore) -> String {
        let mut parts = Vec::new();
        if !score.missing_objects.is_empty() {
            parts.push(format!("missing: {}", score.missing_objects.join(", ")));
        }
        if !score.new_objects.is_empty() {
            parts.push(format!("new: {}", score.new_objects.join(", ")));
        }
        if parts.is_empty() {
            "object set changed".to_string()
        } else {
            parts.join("; ")
        }
    }
}
