// Validate interactor - Orchestrates frame acquisition, scene validation and report export

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::app::retry::{with_retry, RetryPolicy};
use crate::domain::model::*;
use crate::domain::usecases::ValidateSceneUseCase;
use crate::error::{PerceptionError, SceneValidatorResult};
use crate::ports::*;
use crate::utils::path::PathUtils;
use crate::utils::Utils;

/// Where the frame sequence comes from
#[derive(Debug, Clone, PartialEq)]
pub enum FrameSource {
    /// One JSON file holding already-normalized records
    Records(PathBuf),
    /// Frames in sequence order
    Frames(Vec<PathBuf>),
    /// Every frame of a directory, sorted by file name
    Directory(PathBuf),
}

/// Request for scene validation
#[derive(Debug, Clone)]
pub struct ValidateRequest {
    pub source: FrameSource,
    pub config: ValidationConfig,
    pub format: ReportFormat,
    /// Also export the report here when set
    pub output: Option<PathBuf>,
    pub overwrite: OverwritePolicy,
}

/// Response from scene validation
#[derive(Debug, Clone)]
pub struct ValidateResponse {
    pub document: ReportDocument,
    /// Report rendered in the requested format
    pub rendered: String,
    pub written_to: Option<PathBuf>,
}

/// Interactor for the scene validation use case
pub struct ValidateInteractor {
    perception_port: Arc<dyn PerceptionPort>,
    report_port: Arc<dyn ReportPort>,
    log_port: Arc<dyn LogPort>,
    retry: RetryPolicy,
    max_concurrency: usize,
}

impl ValidateInteractor {
    /// Create new validate interactor with injected ports
    pub fn new(
        perception_port: Arc<dyn PerceptionPort>,
        report_port: Arc<dyn ReportPort>,
        log_port: Arc<dyn LogPort>,
        settings: &PerceptionSettings,
    ) -> Self {
        Self {
            perception_port,
            report_port,
            log_port,
            retry: RetryPolicy::from_settings(settings),
            max_concurrency: settings.max_concurrency.max(1),
        }
    }

    /// Execute scene validation
    pub async fn execute(&self, request: ValidateRequest) -> SceneValidatorResult<ValidateResponse> {
        let started = Instant::now();
        let frames = self.acquire(&request.source).await?;
        self.log_port
            .debug(&format!("Acquired {} frame records", frames.len()))
            .await;

        let report = ValidateSceneUseCase::execute(&frames, &request.config)?;
        self.log_port
            .log_event(
                &LogEvent::new(LogLevel::Info, "Scene validated")
                    .with("frames", report.frame_count)
                    .with("problems", report.issue_count())
                    .with("average_continuity", format!("{:.3}", report.average_continuity))
                    .with("composition_score", format!("{:.2}", report.composition_score))
                    .with("elapsed", Utils::format_duration(started.elapsed())),
            )
            .await;

        let document = ReportDocument::new(report, request.config);
        let rendered = self.report_port.render(&document, request.format)?;

        if let Some(path) = &request.output {
            self.report_port
                .export(&document, path, request.format, request.overwrite)
                .await?;
        }

        Ok(ValidateResponse {
            document,
            rendered,
            written_to: request.output,
        })
    }

    /// Resolve the source into an ordered record sequence
    pub async fn acquire(&self, source: &FrameSource) -> SceneValidatorResult<Vec<FrameAnalysisRecord>> {
        match source {
            FrameSource::Records(path) => {
                let label = path.display().to_string();
                let port = &self.perception_port;
                Ok(with_retry(&self.retry, &label, || port.load_records(path)).await?)
            }
            FrameSource::Frames(paths) => Ok(self.acquire_frames(paths).await?),
            FrameSource::Directory(dir) => {
                let paths = PathUtils::collect_frame_files(dir)?;
                self.log_port
                    .info(&format!("Found {} frames in {}", paths.len(), dir.display()))
                    .await;
                Ok(self.acquire_frames(&paths).await?)
            }
        }
    }

    /// Analyze frames concurrently, bounded by `max_concurrency`, and restore input order
    ///
    /// The first failure aborts the remaining analyses.
    pub async fn acquire_frames(
        &self,
        paths: &[PathBuf],
    ) -> Result<Vec<FrameAnalysisRecord>, PerceptionError> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();

        for (index, path) in paths.iter().cloned().enumerate() {
            let port = Arc::clone(&self.perception_port);
            let semaphore = Arc::clone(&semaphore);
            let retry = self.retry;
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|_| PerceptionError::Unavailable("frame acquisition stopped".into()))?;
                let label = path.display().to_string();
                let record = with_retry(&retry, &label, || port.analyze_frame(index, &path)).await?;
                Ok::<_, PerceptionError>((index, record))
            });
        }

        let mut slots: Vec<Option<FrameAnalysisRecord>> = vec![None; paths.len()];
        while let Some(joined) = tasks.join_next().await {
            let (index, record) = joined
                .map_err(|e| PerceptionError::Unavailable(format!("frame task failed: {}", e)))??;
            slots[index] = Some(record);
        }

        slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| PerceptionError::Unavailable("frame analysis incomplete".into()))
    }
}
