// TOML config adapter - Settings loaded from TOML files

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::model::*;
use crate::error::{SceneValidatorError, SceneValidatorResult};
use crate::ports::*;

/// Locations tried, in order, when no explicit config file is given
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["scene_validator.toml", "config/scene_validator.toml"];

/// On-disk layout; every key is optional and falls back to the built-in default
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    #[serde(default)]
    pub continuity: ContinuitySection,
    #[serde(default)]
    pub composition: CompositionSection,
    #[serde(default)]
    pub recommendations: RecommendationSection,
    #[serde(default)]
    pub perception: PerceptionSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContinuitySection {
    pub object_stability: Option<f64>,
    pub color_distance: Option<f64>,
    pub rating_delta: Option<f64>,
    pub problem_frame_threshold: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompositionSection {
    pub representative_set: Option<RepresentativeSet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecommendationSection {
    pub strong_composition: Option<f64>,
    pub weak_composition: Option<f64>,
    pub stable_continuity: Option<f64>,
    pub key_frame_problem_limit: Option<usize>,
}

impl RecommendationSection {
    fn into_policy(self) -> RecommendationPolicy {
        let defaults = RecommendationPolicy::default();
        RecommendationPolicy {
            strong_composition: self.strong_composition.unwrap_or(defaults.strong_composition),
            weak_composition: self.weak_composition.unwrap_or(defaults.weak_composition),
            stable_continuity: self.stable_continuity.unwrap_or(defaults.stable_continuity),
            key_frame_problem_limit: self
                .key_frame_problem_limit
                .unwrap_or(defaults.key_frame_problem_limit),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerceptionSection {
    pub palette_size: Option<usize>,
    pub min_object_confidence: Option<f64>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub base_delay_ms: Option<u64>,
    pub max_delay_ms: Option<u64>,
    pub max_concurrency: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub format: Option<ReportFormat>,
    pub overwrite: Option<OverwritePolicy>,
}

impl FileSettings {
    /// Parse TOML text
    pub fn parse(content: &str) -> SceneValidatorResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay this file on the defaults and validate the result
    pub fn into_settings(self) -> SceneValidatorResult<AppSettings> {
        let defaults = ContinuityWeights::default();
        let weights = ContinuityWeights::new(
            self.continuity.object_stability.unwrap_or(defaults.object_stability),
            self.continuity.color_distance.unwrap_or(defaults.color_distance),
            self.continuity.rating_delta.unwrap_or(defaults.rating_delta),
        )?;

        let mut builder = ValidationConfig::builder()
            .weights(weights)
            .policy(self.recommendations.into_policy());
        if let Some(threshold) = self.continuity.problem_frame_threshold {
            builder = builder.problem_frame_threshold(threshold);
        }
        if let Some(set) = self.composition.representative_set {
            builder = builder.representative_set(set);
        }
        let validation = builder.build()?;

        let mut perception = PerceptionSettings::default();
        let section = self.perception;
        perception.palette_size = section.palette_size.unwrap_or(perception.palette_size);
        perception.min_object_confidence = section
            .min_object_confidence
            .unwrap_or(perception.min_object_confidence);
        perception.timeout_secs = section.timeout_secs.unwrap_or(perception.timeout_secs);
        perception.max_retries = section.max_retries.unwrap_or(perception.max_retries);
        perception.base_delay_ms = section.base_delay_ms.unwrap_or(perception.base_delay_ms);
        perception.max_delay_ms = section.max_delay_ms.unwrap_or(perception.max_delay_ms);
        perception.max_concurrency = section.max_concurrency.unwrap_or(perception.max_concurrency);
        validate_perception(&perception)?;

        let mut output = OutputSettings::default();
        output.format = self.output.format.unwrap_or(output.format);
        output.overwrite = self.output.overwrite.unwrap_or(output.overwrite);

        Ok(AppSettings {
            validation,
            perception,
            output,
        })
    }
}

/// Reject perception settings that would stall or skip acquisition
pub fn validate_perception(settings: &PerceptionSettings) -> SceneValidatorResult<()> {
    if settings.palette_size == 0 {
        return Err(SceneValidatorError::config("perception.palette_size must be at least 1"));
    }
    if settings.max_concurrency == 0 {
        return Err(SceneValidatorError::config("perception.max_concurrency must be at least 1"));
    }
    if settings.timeout_secs == 0 {
        return Err(SceneValidatorError::config("perception.timeout_secs must be at least 1"));
    }
    if !(0.0..=1.0).contains(&settings.min_object_confidence) {
        return Err(SceneValidatorError::config(format!(
            "perception.min_object_confidence must lie in [0, 1], got {}",
            settings.min_object_confidence
        )));
    }
    if settings.base_delay_ms > settings.max_delay_ms {
        return Err(SceneValidatorError::config(
            "perception.base_delay_ms must not exceed perception.max_delay_ms",
        ));
    }
    Ok(())
}

/// TOML configuration adapter
pub struct TomlConfigAdapter {
    search_paths: Vec<PathBuf>,
}

impl TomlConfigAdapter {
    /// Create new TOML config adapter searching the default locations
    pub fn new() -> Self {
        Self::with_search_paths(DEFAULT_CONFIG_PATHS.iter().map(PathBuf::from).collect())
    }

    pub fn with_search_paths(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    fn read(path: &Path) -> SceneValidatorResult<AppSettings> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SceneValidatorError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let settings = FileSettings::parse(&content)?.into_settings()?;
        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(settings)
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigPort for TomlConfigAdapter {
    fn load_settings(&self, path: Option<&Path>) -> SceneValidatorResult<AppSettings> {
        if let Some(path) = path {
            if !path.is_file() {
                return Err(SceneValidatorError::config(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            return Self::read(path);
        }

        match self.search_paths.iter().find(|p| p.is_file()) {
            Some(found) => Self::read(found),
            None => {
                tracing::debug!("No configuration file found, using defaults");
                Ok(AppSettings::default())
            }
        }
    }
}
