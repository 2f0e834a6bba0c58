// Inspect interactor - Shows the normalized record of a single frame

use std::path::PathBuf;
use std::sync::Arc;

use crate::app::retry::{with_retry, RetryPolicy};
use crate::domain::model::*;
use crate::error::SceneValidatorResult;
use crate::ports::*;

/// Interactor for frame inspection
pub struct InspectInteractor {
    perception_port: Arc<dyn PerceptionPort>,
    log_port: Arc<dyn LogPort>,
    retry: RetryPolicy,
}

impl InspectInteractor {
    /// Create new inspect interactor with injected ports
    pub fn new(
        perception_port: Arc<dyn PerceptionPort>,
        log_port: Arc<dyn LogPort>,
        settings: &PerceptionSettings,
    ) -> Self {
        Self {
            perception_port,
            log_port,
            retry: RetryPolicy::from_settings(settings),
        }
    }

    /// Execute frame inspection
    pub async fn execute(&self, request: InspectRequest) -> SceneValidatorResult<InspectResponse> {
        let label = request.frame.display().to_string();
        self.log_port
            .info(&format!(
                "Inspecting {} with {} provider",
                label,
                self.perception_port.provider_name()
            ))
            .await;

        let port = &self.perception_port;
        let record = with_retry(&self.retry, &label, || port.analyze_frame(0, &request.frame)).await?;

        let summary = if request.json {
            serde_json::to_string_pretty(&record)?
        } else {
            Self::format_as_text(&record, &label)
        };

        Ok(InspectResponse { record, summary })
    }

    /// Format a record as human-readable text
    fn format_as_text(record: &FrameAnalysisRecord, label: &str) -> String {
        let mut output = String::new();

        output.push_str("Frame Analysis:\n");
        output.push_str(&format!("  Frame: {}\n", label));
        output.push_str(&format!("  Overall rating: {:.1}/10\n", record.overall_rating));

        output.push_str(&format!("\nObjects ({}):\n", record.detected_objects.len()));
        for object in &record.detected_objects {
            let confidence = object
                .confidence
                .map(|c| format!(" ({:.0}%)", c * 100.0))
                .unwrap_or_default();
            output.push_str(&format!("  {}{}\n", object.label, confidence));
        }

        let palette: Vec<String> = record.color_palette.iter().map(ToString::to_string).collect();
        output.push_str(&format!("\nPalette: {}\n", palette.join(" ")));

        output.push_str(&format!("\nComposition: {}\n", record.composition_quality));
        output.push_str(&format!("Lighting: {}\n", record.lighting_assessment));
        output.push_str(&format!("Depth: {}\n", record.depth_perspective));

        output
    }
}

/// Request for frame inspection
#[derive(Debug, Clone)]
pub struct InspectRequest {
    pub frame: PathBuf,
    pub json: bool,
}

/// Response from frame inspection
#[derive(Debug, Clone)]
pub struct InspectResponse {
    pub record: FrameAnalysisRecord,
    pub summary: String,
}
