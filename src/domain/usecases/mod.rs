// Domain use cases - Use case orchestration

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;

/// Share of the scene quality blend taken by average continuity; composition takes the rest
pub const SCENE_QUALITY_CONTINUITY_SHARE: f64 = 0.6;

/// Scene validation over an ordered, already-acquired frame sequence
///
/// Pure and synchronous: no I/O, no retained state, identical output for identical input.
pub struct ValidateSceneUseCase;

impl ValidateSceneUseCase {
    /// Validate `frames` and assemble the report
    ///
    /// Fails with `EmptyFrameSequence` for no frames and with `MisalignedPalette` naming
    /// the offending pair; no partial report is produced on error.
    pub fn execute(
        frames: &[FrameAnalysisRecord],
        config: &ValidationConfig,
    ) -> Result<ValidationReport, DomainError> {
        Self::check_sequence(frames)?;

        let comparator = ContinuityComparator::from_config(config);
        let continuity_scores = frames
            .windows(2)
            .map(|pair| comparator.compare(&pair[0], &pair[1]))
            .collect::<Result<Vec<_>, _>>()?;

        let average_continuity = if continuity_scores.is_empty() {
            1.0
        } else {
            continuity_scores.iter().map(|s| s.value).sum::<f64>() / continuity_scores.len() as f64
        };

        let threshold = config.problem_frame_threshold();
        let problem_frame_indices = ProblemFrameClassifier::classify(&continuity_scores, threshold);
        let composition_score = CompositionAggregator::aggregate(frames, config.representative_set())?;

        let recommendations = RecommendationGenerator::generate(&RecommendationContext {
            frame_count: frames.len(),
            continuity_scores: &continuity_scores,
            problem_frame_indices: &problem_frame_indices,
            composition_score,
            config,
        });

        let policy = config.policy();
        let key_frames = Self::key_frames(frames, &problem_frame_indices, policy.key_frame_problem_limit);
        let scene_quality = (SCENE_QUALITY_CONTINUITY_SHARE * average_continuity
            + (1.0 - SCENE_QUALITY_CONTINUITY_SHARE) * composition_score / RATING_MAX)
            .clamp(0.0, 1.0);

        Ok(ValidationReport {
            frame_count: frames.len(),
            continuity_tier: ContinuityTier::classify(average_continuity, threshold, policy),
            continuity_scores,
            average_continuity,
            problem_frame_indices,
            composition_tier: CompositionTier::classify(composition_score, policy),
            composition_score,
            scene_quality,
            key_frames,
            recommendations,
        })
    }

    /// Non-empty, contiguous ascending indices, ratings in range
    fn check_sequence(frames: &[FrameAnalysisRecord]) -> Result<(), DomainError> {
        let first = frames.first().ok_or(DomainError::EmptyFrameSequence)?;
        for (position, frame) in frames.iter().enumerate() {
            let Some(expected) = first.index.checked_add(position) else {
                return Err(DomainError::IndexOverflow {
                    position,
                    start: first.index,
                });
            };
            if frame.index != expected {
                return Err(DomainError::NonContiguousIndex {
                    position,
                    expected,
                    found: frame.index,
                });
            }
            frame.validate_rating()?;
        }
        Ok(())
    }

    /// First frame, up to `problem_limit` interior problem frames, then the last frame
    fn key_frames(
        frames: &[FrameAnalysisRecord],
        problem_frame_indices: &[usize],
        problem_limit: usize,
    ) -> Vec<KeyFrameAssessment> {
        let (Some(first), Some(last)) = (frames.first(), frames.last()) else {
            return Vec::new();
        };

        let mut key_frames = vec![KeyFrameAssessment::from_record(first, KeyFrameRole::First)];
        key_frames.extend(
            problem_frame_indices
                .iter()
                .filter(|&&index| index != first.index && index != last.index)
                .take(problem_limit)
                .filter_map(|&index| frames.get(index - first.index))
                .map(|record| KeyFrameAssessment::from_record(record, KeyFrameRole::Problem)),
        );
        if last.index != first.index {
            key_frames.push(KeyFrameAssessment::from_record(last, KeyFrameRole::Last));
        }
        key_frames
    }
}

/// Continuity check of a single pair of frames
pub struct CompareFramesUseCase;

impl CompareFramesUseCase {
    /// Score `prev -> curr` with the configured weights
    pub fn execute(
        prev: &FrameAnalysisRecord,
        curr: &FrameAnalysisRecord,
        config: &ValidationConfig,
    ) -> Result<ContinuityScore, DomainError> {
        prev.validate_rating()?;
        curr.validate_rating()?;
        ContinuityComparator::from_config(config).compare(prev, curr)
    }
}

#[cfg(test)]
mod tests;
