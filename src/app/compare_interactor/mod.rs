// Compare interactor - Continuity check of a single frame pair

use std::path::PathBuf;
use std::sync::Arc;

use crate::app::retry::{with_retry, RetryPolicy};
use crate::domain::model::*;
use crate::domain::usecases::CompareFramesUseCase;
use crate::error::SceneValidatorResult;
use crate::ports::*;

/// Request for a pairwise comparison
#[derive(Debug, Clone)]
pub struct CompareRequest {
    pub from: PathBuf,
    pub to: PathBuf,
    pub config: ValidationConfig,
}

/// Pairwise continuity result
#[derive(Debug, Clone, serde::Serialize)]
pub struct CompareResponse {
    pub score: ContinuityScore,
    /// Factor with the largest weighted penalty
    pub dominant_factor: ContinuityFactor,
    pub below_threshold: bool,
}

impl CompareResponse {
    pub fn summary(&self) -> String {
        let components = &self.score.components;
        let mut output = format!(
            "Continuity {} -> {}: {:.3} ({:?}){}\n",
            self.score.from_index,
            self.score.to_index,
            self.score.value,
            self.score.tier,
            if self.below_threshold { " (below threshold)" } else { "" }
        );
        output.push_str(&format!("  object stability: {:.3}\n", components.object_stability));
        output.push_str(&format!("  color similarity: {:.3}\n", components.color_similarity));
        output.push_str(&format!("  rating similarity: {:.3}\n", components.rating_similarity));
        if !self.score.missing_objects.is_empty() {
            output.push_str(&format!("  missing: {}\n", self.score.missing_objects.join(", ")));
        }
        if !self.score.new_objects.is_empty() {
            output.push_str(&format!("  new: {}\n", self.score.new_objects.join(", ")));
        }
        if self.score.value < 1.0 {
            output.push_str(&format!("  dominant factor: {}\n", self.dominant_factor));
        }
        output
    }
}

/// Interactor for the pairwise comparison use case
pub struct CompareInteractor {
    perception_port: Arc<dyn PerceptionPort>,
    log_port: Arc<dyn LogPort>,
    retry: RetryPolicy,
}

impl CompareInteractor {
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

    pub async fn execute(&self, request: CompareRequest) -> SceneValidatorResult<CompareResponse> {
        let port = &self.perception_port;
        let from_label = request.from.display().to_string();
        let to_label = request.to.display().to_string();

        let (prev, curr) = tokio::try_join!(
            with_retry(&self.retry, &from_label, || port.analyze_frame(0, &request.from)),
            with_retry(&self.retry, &to_label, || port.analyze_frame(1, &request.to)),
        )?;

        let score = CompareFramesUseCase::execute(&prev, &curr, &request.config)?;
        self.log_port
            .debug(&format!("Compared {} with {}: {:.3}", from_label, to_label, score.value))
            .await;

        Ok(CompareResponse {
            dominant_factor: score.dominant_factor(request.config.weights()),
            below_threshold: score.tier == ContinuityTier::Discontinuous,
            score,
        })
    }
}
