// Filesystem report adapter - Renders reports and writes them atomically

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;

use crate::domain::model::*;
use crate::error::{SceneValidatorError, SceneValidatorResult};
use crate::ports::*;
use crate::utils::Utils;

/// Report adapter writing to the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReportAdapter;

impl FsReportAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Human-readable report
    pub fn format_as_text(document: &ReportDocument) -> String {
        let report = &document.report;
        let config = &document.config;
        let weights = config.weights();
        let mut output = String::new();

        output.push_str("Scene Validation Report\n");
        output.push_str("=======================\n");
        output.push_str(&format!(
            "Generated: {} (scene-validator {})\n",
            document.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            document.tool_version
        ));
        output.push_str(&format!(
            "Weights: objects {:.2}, colors {:.2}, rating {:.2}; threshold {:.2}; composition from {}\n\n",
            weights.object_stability,
            weights.color_distance,
            weights.rating_delta,
            config.problem_frame_threshold(),
            config.representative_set()
        ));

        output.push_str(&format!("Frames: {}\n", report.frame_count));
        output.push_str(&format!(
            "Average continuity: {:.3} ({:?})\n",
            report.average_continuity, report.continuity_tier
        ));
        output.push_str(&format!(
            "Composition score: {:.1}/10 ({:?})\n",
            report.composition_score, report.composition_tier
        ));
        output.push_str(&format!("Scene quality: {}\n", Utils::format_ratio(report.scene_quality)));

        if !report.continuity_scores.is_empty() {
            output.push_str("\nContinuity:\n");
            for score in &report.continuity_scores {
                let flag = if score.tier == ContinuityTier::Discontinuous {
                    "  <- problem"
                } else {
                    ""
                };
                output.push_str(&format!(
                    "  {:>4} -> {:<4} {:.3} {:?} (objects {:.2}, colors {:.2}, rating {:.2}){}\n",
                    score.from_index,
                    score.to_index,
                    score.value,
                    score.tier,
                    score.components.object_stability,
                    score.components.color_similarity,
                    score.components.rating_similarity,
                    flag
                ));
            }
        }

        if report.problem_frame_indices.is_empty() {
            output.push_str("\nProblem frames: none\n");
        } else {
            let indices: Vec<String> = report
                .problem_frame_indices
                .iter()
                .map(ToString::to_string)
                .collect();
            output.push_str(&format!("\nProblem frames: {}\n", indices.join(", ")));
        }

        if !report.key_frames.is_empty() {
            output.push_str("\nKey frames:\n");
            for key in &report.key_frames {
                output.push_str(&format!(
                    "  Frame {} ({:?}), rating {:.1}\n",
                    key.index, key.role, key.overall_rating
                ));
                for (name, text) in [
                    ("composition", &key.composition_quality),
                    ("lighting", &key.lighting_assessment),
                    ("depth", &key.depth_perspective),
                ] {
                    if !text.is_empty() {
                        output.push_str(&format!("    {}: {}\n", name, text));
                    }
                }
            }
        }

        if !report.recommendations.is_empty() {
            output.push_str("\nRecommendations:\n");
            for recommendation in &report.recommendations {
                output.push_str(&format!("  - {}\n", recommendation));
            }
        }

        output
    }

    fn target_dir(path: &Path) -> PathBuf {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Write through a temp file in the target directory, then rename into place
    fn write_atomic(path: &Path, content: &str, overwrite: OverwritePolicy) -> SceneValidatorResult<()> {
        let dir = Self::target_dir(path);
        std::fs::create_dir_all(&dir)?;

        let mut temp = NamedTempFile::new_in(&dir)?;
        temp.write_all(content.as_bytes())?;
        temp.flush()?;

        let persisted = match overwrite {
            OverwritePolicy::Always => temp.persist(path),
            OverwritePolicy::Never => temp.persist_noclobber(path),
        };
        persisted.map_err(|e| {
            SceneValidatorError::output(format!("{}: {}", path.display(), e.error))
        })?;
        Ok(())
    }
}

#[async_trait]
impl ReportPort for FsReportAdapter {
    fn render(&self, document: &ReportDocument, format: ReportFormat) -> SceneValidatorResult<String> {
        match format {
            ReportFormat::Text => Ok(Self::format_as_text(document)),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(document)?),
            ReportFormat::Yaml => Ok(serde_yaml::to_string(document)?),
        }
    }

    async fn export(
        &self,
        document: &ReportDocument,
        path: &Path,
        format: ReportFormat,
        overwrite: OverwritePolicy,
    ) -> SceneValidatorResult<()> {
        if overwrite == OverwritePolicy::Never && path.exists() {
            return Err(SceneValidatorError::output(format!(
                "{} already exists (use --overwrite always to replace it)",
                path.display()
            )));
        }

        let content = self.render(document, format)?;
        let target = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::write_atomic(&target, &content, overwrite))
            .await
            .map_err(|e| SceneValidatorError::output(format!("report writer task failed: {}", e)))??;

        tracing::info!(path = %path.display(), format = %format, "Report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::usecases::ValidateSceneUseCase;
    use tempfile::TempDir;

    fn document() -> ReportDocument {
        let frames = vec![
            FrameAnalysisRecord::new(0, 8.0)
                .with_labels(["person"])
                .with_assessments("balanced", "soft", "shallow"),
            FrameAnalysisRecord::new(1, 3.0).with_labels(["car"]),
        ];
        let config = ValidationConfig::default();
        let report = ValidateSceneUseCase::execute(&frames, &config).unwrap();
        ReportDocument::new(report, config)
    }

    #[test]
    fn test_text_rendering() {
        let text = FsReportAdapter::new()
            .render(&document(), ReportFormat::Text)
            .unwrap();
        assert!(text.contains("Frames: 2"));
        assert!(text.contains("Problem frames: 1"));
        assert!(text.contains("Discontinuous (objects"));
        assert!(text.contains("<- problem"));
        assert!(text.contains("composition: balanced"));
        assert!(text.contains("Recommendations:"));
    }

    #[test]
    fn test_json_envelope() {
        let json = FsReportAdapter::new()
            .render(&document(), ReportFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["tool_version"], env!("CARGO_PKG_VERSION"));
        assert!(value["generated_at"].is_string());
        assert_eq!(value["report"]["frame_count"], 2);
        assert_eq!(value["report"]["problem_frame_indices"][0], 1);
        assert_eq!(value["config"]["representative_set"], "first_last");
    }

    #[test]
    fn test_yaml_rendering() {
        let yaml = FsReportAdapter::new()
            .render(&document(), ReportFormat::Yaml)
            .unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value["report"]["frame_count"].as_u64(), Some(2));
    }

    #[tokio::test]
    async fn test_export_respects_overwrite_policy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports").join("scene.json");
        let adapter = FsReportAdapter::new();
        let doc = document();

        adapter
            .export(&doc, &path, ReportFormat::Json, OverwritePolicy::Never)
            .await
            .unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        assert!(first.contains("\"frame_count\": 2"));

        let refused = adapter
            .export(&doc, &path, ReportFormat::Text, OverwritePolicy::Never)
            .await;
        assert!(matches!(refused, Err(SceneValidatorError::Output { .. })));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), first);

        adapter
            .export(&doc, &path, ReportFormat::Text, OverwritePolicy::Always)
            .await
            .unwrap();
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .starts_with("Scene Validation Report"));

        let leftovers = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }
}
