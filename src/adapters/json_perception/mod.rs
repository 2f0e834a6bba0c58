// JSON perception adapter - Reads recorded provider output from disk

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;

use crate::domain::model::FrameAnalysisRecord;
use crate::error::PerceptionError;
use crate::ports::*;
use crate::utils::path::PathUtils;

pub mod payload;

use payload::{Normalization, ProviderPayload};

/// Perception adapter over per-frame provider dumps
///
/// A frame image `shot_01.png` is analyzed by reading its sidecar `shot_01.json`.
pub struct JsonPerceptionAdapter {
    normalization: Normalization,
}

impl JsonPerceptionAdapter {
    /// Create new JSON perception adapter
    pub fn new(settings: &PerceptionSettings) -> Self {
        Self {
            normalization: Normalization {
                palette_size: settings.palette_size,
                min_object_confidence: settings.min_object_confidence,
            },
        }
    }

    async fn read_source(path: &Path) -> Result<String, PerceptionError> {
        tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => PerceptionError::NotFound(path.display().to_string()),
            _ => PerceptionError::Io(e),
        })
    }
}

#[async_trait]
impl PerceptionPort for JsonPerceptionAdapter {
    async fn analyze_frame(
        &self,
        index: usize,
        frame_path: &Path,
    ) -> Result<FrameAnalysisRecord, PerceptionError> {
        let source = PathUtils::sidecar_path(frame_path);
        let frame = source.display().to_string();
        tracing::debug!(index, source = %frame, "Reading provider dump");

        let content = Self::read_source(&source).await?;
        let payload: ProviderPayload = serde_json::from_str(&content)
            .map_err(|e| PerceptionError::malformed(&frame, e.to_string()))?;

        payload.into_record(index, &frame, self.normalization)
    }

    async fn load_records(&self, path: &Path) -> Result<Vec<FrameAnalysisRecord>, PerceptionError> {
        let content = Self::read_source(path).await?;
        serde_json::from_str(&content)
            .map_err(|e| PerceptionError::malformed(path.display().to_string(), e.to_string()))
    }

    fn provider_name(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests;
