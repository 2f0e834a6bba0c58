use std::fs;

use serde_json::json;
use tempfile::TempDir;

use super::payload::*;
use super::*;
use crate::domain::model::*;

fn settings() -> PerceptionSettings {
    PerceptionSettings {
        palette_size: 2,
        min_object_confidence: 0.5,
        ..PerceptionSettings::default()
    }
}

fn dump() -> serde_json::Value {
    json!({
        "vision": {
            "objects": [
                {
                    "name": " Person ",
                    "confidence": 0.92,
                    "bounding_box": [
                        {"x": 0.1, "y": 0.2}, {"x": 0.5, "y": 0.2},
                        {"x": 0.5, "y": 0.9}, {"x": 0.1, "y": 0.9}
                    ]
                },
                {"name": "Lamp", "confidence": 0.3, "bounding_box": []},
                {"name": "Chair"}
            ],
            "labels": [{"description": "Room", "confidence": 0.8}],
            "colors": [
                {"color": [10.0, 20.0, 30.0], "score": 0.2, "pixel_fraction": 0.1},
                {"color": [200.4, 300.0, -4.0], "score": 0.6, "pixel_fraction": 0.5},
                {"color": [1.0, 2.0, 3.0], "score": 0.4, "pixel_fraction": 0.2}
            ]
        },
        "assessment": {
            "composition_quality": "rule of thirds",
            "lighting_assessment": "soft key light",
            "depth_perspective": {"layers": 3},
            "overall_rating": "7.5/10"
        }
    })
}

fn write_json(dir: &TempDir, name: &str, value: &serde_json::Value) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path
}

#[tokio::test]
async fn test_analyze_frame_normalizes_dump() {
    let dir = TempDir::new().unwrap();
    write_json(&dir, "shot_01.json", &dump());
    let adapter = JsonPerceptionAdapter::new(&settings());

    let record = adapter
        .analyze_frame(3, &dir.path().join("shot_01.png"))
        .await
        .unwrap();

    assert_eq!(record.index, 3);
    let labels: Vec<_> = record.detected_objects.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["person", "chair"]);
    assert_eq!(
        record.detected_objects[0].bounding_box,
        Some(BoundingBox {
            x_min: 0.1,
            y_min: 0.2,
            x_max: 0.5,
            y_max: 0.9
        })
    );
    assert_eq!(record.color_palette, vec![Rgb::new(200, 255, 0), Rgb::new(1, 2, 3)]);
    assert_eq!(record.composition_quality, "rule of thirds");
    assert_eq!(record.depth_perspective, r#"{"layers":3}"#);
    assert_eq!(record.overall_rating, 7.5);
}

#[tokio::test]
async fn test_raw_analysis_in_code_fences() {
    let dir = TempDir::new().unwrap();
    let mut value = dump();
    value["assessment"] = json!({
        "raw_analysis": "```json\n{\"composition_quality\": \"centered\", \"overall_rating\": 6}\n```"
    });
    let path = write_json(&dir, "frame.json", &value);
    let adapter = JsonPerceptionAdapter::new(&settings());

    let record = adapter.analyze_frame(0, &path).await.unwrap();
    assert_eq!(record.composition_quality, "centered");
    assert_eq!(record.lighting_assessment, "");
    assert_eq!(record.overall_rating, 6.0);
}

#[tokio::test]
async fn test_missing_sidecar_is_not_found() {
    let dir = TempDir::new().unwrap();
    let adapter = JsonPerceptionAdapter::new(&settings());
    let result = adapter.analyze_frame(0, &dir.path().join("absent.jpg")).await;
    assert!(matches!(result, Err(PerceptionError::NotFound(_))));
}

#[tokio::test]
async fn test_rating_problems_are_malformed() {
    let dir = TempDir::new().unwrap();
    let adapter = JsonPerceptionAdapter::new(&settings());

    for rating in [json!(11), json!("excellent"), json!(null)] {
        let mut value = dump();
        value["assessment"]["overall_rating"] = rating;
        let path = write_json(&dir, "frame.json", &value);
        let result = adapter.analyze_frame(0, &path).await;
        assert!(matches!(result, Err(PerceptionError::Malformed { .. })));
    }

    let mut value = dump();
    value["assessment"].as_object_mut().unwrap().remove("overall_rating");
    let path = write_json(&dir, "frame.json", &value);
    assert!(matches!(
        adapter.analyze_frame(0, &path).await,
        Err(PerceptionError::Malformed { .. })
    ));
}

#[tokio::test]
async fn test_recorded_provider_error_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, "frame.json", &json!({"error": "quota exceeded"}));
    let adapter = JsonPerceptionAdapter::new(&settings());
    let err = adapter.analyze_frame(0, &path).await.unwrap_err();
    assert!(err.to_string().contains("quota exceeded"));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_load_records() {
    let dir = TempDir::new().unwrap();
    let path = write_json(
        &dir,
        "records.json",
        &json!([
            {"index": 0, "detected_objects": [{"label": "car"}], "color_palette": [[1, 2, 3]], "overall_rating": 5.0},
            {"index": 1, "overall_rating": 6.0}
        ]),
    );
    let adapter = JsonPerceptionAdapter::new(&settings());

    let records = adapter.load_records(&path).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].color_palette, vec![Rgb::new(1, 2, 3)]);
    assert!(records[1].detected_objects.is_empty());

    let bad = write_json(&dir, "bad.json", &json!({"index": 0}));
    assert!(matches!(
        adapter.load_records(&bad).await,
        Err(PerceptionError::Malformed { .. })
    ));
}

#[test]
fn test_parse_rating_forms() {
    assert_eq!(parse_rating(&json!(8), "f").unwrap(), 8.0);
    assert_eq!(parse_rating(&json!(" 8 "), "f").unwrap(), 8.0);
    assert_eq!(parse_rating(&json!("7.5/10"), "f").unwrap(), 7.5);
    assert_eq!(parse_rating(&json!(0), "f").unwrap(), 0.0);
    assert!(parse_rating(&json!(-0.5), "f").is_err());
    assert!(parse_rating(&json!([8]), "f").is_err());
}

#[test]
fn test_palette_order_is_stable_on_ties() {
    let colors = vec![
        ColorPayload { color: [1.0, 1.0, 1.0], score: 0.5, pixel_fraction: 0.0 },
        ColorPayload { color: [2.0, 2.0, 2.0], score: 0.5, pixel_fraction: 0.0 },
        ColorPayload { color: [3.0, 3.0, 3.0], score: 0.9, pixel_fraction: 0.0 },
    ];
    assert_eq!(
        normalize_palette(colors, 4),
        vec![Rgb::new(3, 3, 3), Rgb::new(1, 1, 1), Rgb::new(2, 2, 2)]
    );
}

#[test]
fn test_strip_code_fences() {
    assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
    assert_eq!(strip_code_fences("```\n[1]\n```"), "[1]");
    assert_eq!(strip_code_fences("  {\"a\": 1} "), "{\"a\": 1}");
}
