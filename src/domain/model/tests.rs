// Unit tests for domain models

use super::*;
use crate::domain::errors::DomainError;

#[test]
fn test_rgb_distance_extremes() {
    let black = Rgb::new(0, 0, 0);
    let white = Rgb::new(255, 255, 255);
    assert_eq!(black.normalized_distance(&black), 0.0);
    assert_eq!(black.normalized_distance(&white), 1.0);
    assert_eq!(white.normalized_distance(&black), 1.0);
}

#[test]
fn test_rgb_serializes_as_triplet() {
    let json = serde_json::to_string(&Rgb::new(12, 34, 56)).unwrap();
    assert_eq!(json, "[12,34,56]");
    let parsed: Rgb = serde_json::from_str("[255,0,128]").unwrap();
    assert_eq!(parsed, Rgb::new(255, 0, 128));
    assert_eq!(parsed.to_string(), "#ff0080");
}

#[test]
fn test_bounding_box_from_vertices() {
    let bbox = BoundingBox::from_vertices(&[(0.2, 0.1), (0.6, 0.1), (0.6, 0.5), (0.2, 0.5)]).unwrap();
    assert_eq!(bbox.x_min, 0.2);
    assert_eq!(bbox.y_min, 0.1);
    assert_eq!(bbox.x_max, 0.6);
    assert_eq!(bbox.y_max, 0.5);
    assert!(BoundingBox::from_vertices(&[]).is_none());
}

#[test]
fn test_label_set_collapses_duplicates() {
    let record = FrameAnalysisRecord::new(0, 5.0).with_labels(["person", "person", "chair"]);
    let labels = record.label_set();
    assert_eq!(labels.len(), 2);
    assert!(labels.contains("person"));
    assert!(labels.contains("chair"));
}

#[test]
fn test_record_rating_validation() {
    assert!(FrameAnalysisRecord::new(0, 0.0).validate_rating().is_ok());
    assert!(FrameAnalysisRecord::new(0, 10.0).validate_rating().is_ok());
    assert_eq!(
        FrameAnalysisRecord::new(3, 10.5).validate_rating(),
        Err(DomainError::InvalidRating { index: 3, rating: 10.5 })
    );
    assert!(FrameAnalysisRecord::new(0, -0.1).validate_rating().is_err());
    assert!(FrameAnalysisRecord::new(0, f64::NAN).validate_rating().is_err());
}

#[test]
fn test_record_deserializes_with_defaults() {
    let record: FrameAnalysisRecord =
        serde_json::from_str(r#"{"index": 2, "overall_rating": 6.5, "color_palette": [[1,2,3]]}"#)
            .unwrap();
    assert_eq!(record.index, 2);
    assert!(record.detected_objects.is_empty());
    assert_eq!(record.color_palette, vec![Rgb::new(1, 2, 3)]);
    assert_eq!(record.composition_quality, "");
}

#[test]
fn test_default_weights_are_valid() {
    let weights = ContinuityWeights::default();
    assert!(weights.validate().is_ok());
    assert_eq!(weights.object_stability, 0.4);
    assert_eq!(weights.color_distance, 0.3);
    assert_eq!(weights.rating_delta, 0.3);
}

#[test]
fn test_weights_must_sum_to_one() {
    match ContinuityWeights::new(0.5, 0.3, 0.3) {
        Err(DomainError::InvalidWeights { sum }) => assert!((sum - 1.1).abs() < 1e-9),
        other => panic!("expected InvalidWeights, got {:?}", other),
    }
    assert!(ContinuityWeights::new(0.6, 0.2, 0.2).is_ok());
    assert!(ContinuityWeights::new(1.0, 0.0, 0.0).is_ok());
    assert!(ContinuityWeights::new(1.2, -0.1, -0.1).is_err());
}

#[test]
fn test_weights_parse() {
    let weights: ContinuityWeights = "0.5, 0.25, 0.25".parse().unwrap();
    assert_eq!(weights.object_stability, 0.5);
    assert!("0.5,0.5".parse::<ContinuityWeights>().is_err());
    assert!("a,b,c".parse::<ContinuityWeights>().is_err());
    assert!(matches!(
        "0.5,0.5,0.5".parse::<ContinuityWeights>(),
        Err(DomainError::InvalidWeights { .. })
    ));
}

#[test]
fn test_representative_set_parse() {
    assert_eq!("first-last".parse::<RepresentativeSet>().unwrap(), RepresentativeSet::FirstLast);
    assert_eq!("FIRST_LAST".parse::<RepresentativeSet>().unwrap(), RepresentativeSet::FirstLast);
    assert_eq!("all".parse::<RepresentativeSet>().unwrap(), RepresentativeSet::All);
    assert!("middle".parse::<RepresentativeSet>().is_err());
    assert_eq!(RepresentativeSet::All.to_string(), "all");
}

#[test]
fn test_config_defaults() {
    let config = ValidationConfig::default();
    assert_eq!(config.problem_frame_threshold(), 0.7);
    assert_eq!(config.representative_set(), RepresentativeSet::FirstLast);
    assert_eq!(config.policy().strong_composition, 7.5);
    assert_eq!(config.policy().weak_composition, 6.0);
}

#[test]
fn test_config_rejects_bad_threshold() {
    let result = ValidationConfig::builder().problem_frame_threshold(1.5).build();
    assert_eq!(result, Err(DomainError::InvalidThreshold(1.5)));
    assert!(ValidationConfig::builder().problem_frame_threshold(0.0).build().is_ok());
    assert!(ValidationConfig::builder().problem_frame_threshold(1.0).build().is_ok());
}

#[test]
fn test_config_rejects_bad_weights_before_processing() {
    let weights = ContinuityWeights {
        object_stability: 0.4,
        color_distance: 0.4,
        rating_delta: 0.4,
    };
    let result = ValidationConfig::new(weights, 0.7, RepresentativeSet::All);
    assert!(matches!(result, Err(DomainError::InvalidWeights { .. })));
}

#[test]
fn test_config_rejects_inverted_policy() {
    let policy = RecommendationPolicy {
        strong_composition: 5.0,
        weak_composition: 6.0,
        ..RecommendationPolicy::default()
    };
    assert!(matches!(
        ValidationConfig::builder().policy(policy).build(),
        Err(DomainError::BadArgs(_))
    ));
}

#[test]
fn test_continuity_tiers() {
    let policy = RecommendationPolicy::default();
    assert_eq!(ContinuityTier::classify(0.95, 0.7, &policy), ContinuityTier::Stable);
    assert_eq!(ContinuityTier::classify(0.9, 0.7, &policy), ContinuityTier::Stable);
    assert_eq!(ContinuityTier::classify(0.7, 0.7, &policy), ContinuityTier::Acceptable);
    assert_eq!(ContinuityTier::classify(0.69, 0.7, &policy), ContinuityTier::Discontinuous);
}

#[test]
fn test_composition_tiers() {
    let policy = RecommendationPolicy::default();
    assert_eq!(CompositionTier::classify(7.5, &policy), CompositionTier::Strong);
    assert_eq!(CompositionTier::classify(6.0, &policy), CompositionTier::Adequate);
    assert_eq!(CompositionTier::classify(5.99, &policy), CompositionTier::Weak);
}

#[test]
fn test_dominant_factor_prefers_largest_penalty() {
    let weights = ContinuityWeights::default();
    let score = ContinuityScore {
        from_index: 0,
        to_index: 1,
        value: 0.6,
        tier: ContinuityTier::Discontinuous,
        components: ContinuityComponents {
            object_stability: 0.9,
            color_similarity: 0.2,
            rating_similarity: 0.8,
        },
        missing_objects: vec![],
        new_objects: vec![],
    };
    assert_eq!(score.dominant_factor(&weights), ContinuityFactor::ColorShift);
}

#[test]
fn test_dominant_factor_ties_go_to_object_churn() {
    let weights = ContinuityWeights::default();
    let score = ContinuityScore {
        from_index: 0,
        to_index: 1,
        value: 1.0,
        tier: ContinuityTier::Stable,
        components: ContinuityComponents {
            object_stability: 1.0,
            color_similarity: 1.0,
            rating_similarity: 1.0,
        },
        missing_objects: vec![],
        new_objects: vec![],
    };
    assert_eq!(score.dominant_factor(&weights), ContinuityFactor::ObjectChurn);
}
