// Unit tests for scene validation use cases

use super::*;

fn frame(index: usize, labels: &[&str], level: u8, rating: f64) -> FrameAnalysisRecord {
    FrameAnalysisRecord::new(index, rating)
        .with_labels(labels.iter().copied())
        .with_palette(vec![Rgb::new(level, level, level); DEFAULT_PALETTE_SIZE])
        .with_assessments(
            format!("composition of frame {}", index),
            format!("lighting of frame {}", index),
            format!("depth of frame {}", index),
        )
}

/// Five frames with a hard cut into frame 2
fn cut_sequence() -> Vec<FrameAnalysisRecord> {
    vec![
        frame(0, &["person", "chair"], 100, 8.0),
        frame(1, &["person", "chair"], 100, 8.0),
        frame(2, &["car"], 220, 4.0),
        frame(3, &["car"], 220, 4.5),
        frame(4, &["car", "tree"], 215, 5.0),
    ]
}

#[test]
fn test_empty_sequence_fails() {
    let result = ValidateSceneUseCase::execute(&[], &ValidationConfig::default());
    assert_eq!(result, Err(DomainError::EmptyFrameSequence));
}

#[test]
fn test_single_frame_yields_degenerate_report() {
    let frames = vec![frame(0, &["person"], 10, 8.0)];
    let report = ValidateSceneUseCase::execute(&frames, &ValidationConfig::default()).unwrap();

    assert_eq!(report.frame_count, 1);
    assert!(report.continuity_scores.is_empty());
    assert!(report.problem_frame_indices.is_empty());
    assert_eq!(report.composition_score, 8.0);
    assert!(report.recommendations.is_empty());
    assert_eq!(report.average_continuity, 1.0);
    assert_eq!(report.continuity_tier, ContinuityTier::Stable);
    assert_eq!(report.key_frames.len(), 1);
    assert_eq!(report.key_frames[0].role, KeyFrameRole::First);
}

#[test]
fn test_scores_one_per_adjacent_pair() {
    let frames = cut_sequence();
    let report = ValidateSceneUseCase::execute(&frames, &ValidationConfig::default()).unwrap();

    assert_eq!(report.frame_count, 5);
    assert_eq!(report.continuity_scores.len(), 4);
    for (i, score) in report.continuity_scores.iter().enumerate() {
        assert_eq!(score.from_index, i);
        assert_eq!(score.to_index, i + 1);
        assert!((0.0..=1.0).contains(&score.value));
    }
    assert_eq!(report.continuity_scores[0].value, 1.0);
}

#[test]
fn test_hard_cut_is_flagged() {
    let frames = cut_sequence();
    let report = ValidateSceneUseCase::execute(&frames, &ValidationConfig::default()).unwrap();

    assert_eq!(report.problem_frame_indices, vec![2]);
    assert_eq!(report.issue_count(), 1);
    assert!(!report.is_clean());
    assert_eq!(report.recommendations.len(), 1);
    assert!(report.recommendations[0].starts_with("Frame 2:"));
    assert!(report.recommendations[0].contains("object churn"));
    assert!(report.recommendations[0].contains("missing: chair, person; new: car"));
}

#[test]
fn test_composition_score_follows_representative_set() {
    let frames = cut_sequence();

    let first_last = ValidateSceneUseCase::execute(&frames, &ValidationConfig::default()).unwrap();
    assert_eq!(first_last.composition_score, 6.5);
    assert_eq!(first_last.composition_tier, CompositionTier::Adequate);

    let all_config = ValidationConfig::builder()
        .representative_set(RepresentativeSet::All)
        .build()
        .unwrap();
    let all = ValidateSceneUseCase::execute(&frames, &all_config).unwrap();
    assert!((all.composition_score - 5.9).abs() < 1e-12);
    assert_eq!(all.composition_tier, CompositionTier::Weak);
}

#[test]
fn test_threshold_extremes_end_to_end() {
    let frames = cut_sequence();

    let lenient = ValidationConfig::builder().problem_frame_threshold(0.0).build().unwrap();
    let report = ValidateSceneUseCase::execute(&frames, &lenient).unwrap();
    assert!(report.problem_frame_indices.is_empty());

    let mut distinct = frames.clone();
    distinct[1].overall_rating = 7.9;
    let strict = ValidationConfig::builder().problem_frame_threshold(1.0).build().unwrap();
    let report = ValidateSceneUseCase::execute(&distinct, &strict).unwrap();
    assert_eq!(report.problem_frame_indices, vec![1, 2, 3, 4]);
    assert_eq!(report.recommendations.len(), 4);
}

#[test]
fn test_misaligned_palette_fails_whole_run() {
    let mut frames = cut_sequence();
    frames[2].color_palette.pop();

    let result = ValidateSceneUseCase::execute(&frames, &ValidationConfig::default());
    assert_eq!(
        result,
        Err(DomainError::MisalignedPalette {
            from_index: 1,
            to_index: 2,
            from_len: 4,
            to_len: 3,
        })
    );
}

#[test]
fn test_non_contiguous_indices_fail() {
    let mut frames = cut_sequence();
    frames[3].index = 7;
    let result = ValidateSceneUseCase::execute(&frames, &ValidationConfig::default());
    assert_eq!(
        result,
        Err(DomainError::NonContiguousIndex {
            position: 3,
            expected: 3,
            found: 7,
        })
    );
}

#[test]
fn test_index_past_usize_max_fails() {
    let frames = vec![FrameAnalysisRecord::new(usize::MAX, 5.0), FrameAnalysisRecord::new(0, 5.0)];
    let result = ValidateSceneUseCase::execute(&frames, &ValidationConfig::default());
    assert_eq!(
        result,
        Err(DomainError::IndexOverflow {
            position: 1,
            start: usize::MAX,
        })
    );
}

#[test]
fn test_sequence_may_start_at_offset() {
    let frames: Vec<_> = cut_sequence()
        .into_iter()
        .map(|mut f| {
            f.index += 10;
            f
        })
        .collect();
    let report = ValidateSceneUseCase::execute(&frames, &ValidationConfig::default()).unwrap();
    assert_eq!(report.problem_frame_indices, vec![12]);
    assert_eq!(report.key_frames.first().map(|k| k.index), Some(10));
    assert_eq!(report.key_frames.last().map(|k| k.index), Some(14));
}

#[test]
fn test_out_of_range_rating_fails() {
    let mut frames = cut_sequence();
    frames[1].overall_rating = 11.0;
    let result = ValidateSceneUseCase::execute(&frames, &ValidationConfig::default());
    assert_eq!(result, Err(DomainError::InvalidRating { index: 1, rating: 11.0 }));
}

#[test]
fn test_key_frames_cover_first_problems_and_last() {
    let frames = cut_sequence();
    let report = ValidateSceneUseCase::execute(&frames, &ValidationConfig::default()).unwrap();

    let roles: Vec<_> = report.key_frames.iter().map(|k| (k.index, k.role)).collect();
    assert_eq!(
        roles,
        vec![
            (0, KeyFrameRole::First),
            (2, KeyFrameRole::Problem),
            (4, KeyFrameRole::Last)
        ]
    );
    assert_eq!(report.key_frames[1].lighting_assessment, "lighting of frame 2");
}

#[test]
fn test_scene_quality_and_tiers() {
    let frames = cut_sequence();
    let report = ValidateSceneUseCase::execute(&frames, &ValidationConfig::default()).unwrap();

    let expected = 0.6 * report.average_continuity + 0.4 * report.composition_score / 10.0;
    assert!((report.scene_quality - expected).abs() < 1e-12);
    assert!((0.0..=1.0).contains(&report.scene_quality));
    assert_eq!(
        report.continuity_tier,
        ContinuityTier::classify(report.average_continuity, 0.7, &RecommendationPolicy::default())
    );
}

#[test]
fn test_pair_tiers_follow_threshold_and_stable_bound() {
    let config = ValidationConfig::builder()
        .weights(ContinuityWeights::new(0.0, 0.0, 1.0).unwrap())
        .build()
        .unwrap();
    let frames = vec![
        frame(0, &["person"], 80, 8.0),
        frame(1, &["person"], 80, 5.0),
        frame(2, &["person"], 80, 6.0),
        frame(3, &["person"], 80, 0.0),
    ];
    let report = ValidateSceneUseCase::execute(&frames, &config).unwrap();

    let tiers: Vec<_> = report.continuity_scores.iter().map(|s| (s.value, s.tier)).collect();
    assert_eq!(
        tiers,
        vec![
            (0.7, ContinuityTier::Acceptable),
            (0.9, ContinuityTier::Stable),
            (0.4, ContinuityTier::Discontinuous)
        ]
    );
    assert_eq!(report.problem_frame_indices, vec![3]);
}

#[test]
fn test_compare_assigns_tier_from_config() {
    let config = ValidationConfig::builder()
        .weights(ContinuityWeights::new(0.0, 0.0, 1.0).unwrap())
        .problem_frame_threshold(0.95)
        .build()
        .unwrap();
    let score = CompareFramesUseCase::execute(
        &frame(0, &["person"], 80, 8.0),
        &frame(1, &["person"], 80, 7.0),
        &config,
    )
    .unwrap();
    assert_eq!(score.value, 0.9);
    assert_eq!(score.tier, ContinuityTier::Discontinuous);
}

#[test]
fn test_clean_strong_scene_gets_summary() {
    let frames = vec![
        frame(0, &["person"], 80, 8.0),
        frame(1, &["person"], 82, 8.2),
        frame(2, &["person"], 81, 8.1),
    ];
    let report = ValidateSceneUseCase::execute(&frames, &ValidationConfig::default()).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.recommendations.len(), 1);
    assert!(report.recommendations[0].contains("strong composition"));
}

#[test]
fn test_validation_is_deterministic() {
    let frames = cut_sequence();
    let config = ValidationConfig::default();
    let first = ValidateSceneUseCase::execute(&frames, &config).unwrap();
    let second = ValidateSceneUseCase::execute(&frames, &config).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[test]
fn test_compare_frames_use_case() {
    let frames = cut_sequence();
    let config = ValidationConfig::default();
    let score = CompareFramesUseCase::execute(&frames[0], &frames[1], &config).unwrap();
    assert_eq!(score.value, 1.0);

    let mut bad = frames[1].clone();
    bad.overall_rating = -1.0;
    assert!(matches!(
        CompareFramesUseCase::execute(&frames[0], &bad, &config),
        Err(DomainError::InvalidRating { .. })
    ));
}
