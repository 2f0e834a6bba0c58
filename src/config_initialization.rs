//! Configuration initialization and hierarchy management

use tracing::{debug, info};

use crate::adapters::TomlConfigAdapter;
use crate::cli::{Cli, Commands};
use crate::domain::errors::DomainError;
use crate::domain::model::*;
use crate::error::SceneValidatorResult;
use crate::ports::{AppSettings, ConfigPort};

/// Resolve settings following precedence: CLI (and its env bindings) > File > Defaults
pub fn initialize_settings(cli: &Cli) -> SceneValidatorResult<AppSettings> {
    initialize_settings_with(&TomlConfigAdapter::new(), cli)
}

/// Same as [`initialize_settings`] with an explicit config source
pub fn initialize_settings_with(config_port: &dyn ConfigPort, cli: &Cli) -> SceneValidatorResult<AppSettings> {
    let mut settings = config_port.load_settings(cli.config.as_deref())?;
    apply_cli_overrides(&mut settings, cli)?;
    info!(
        threshold = settings.validation.problem_frame_threshold(),
        representative_set = %settings.validation.representative_set(),
        format = %settings.output.format,
        "Configuration resolved"
    );
    Ok(settings)
}

/// Apply CLI argument overrides to already-loaded settings
pub fn apply_cli_overrides(settings: &mut AppSettings, cli: &Cli) -> SceneValidatorResult<()> {
    let mut cli_overrides = 0;

    if let Some(overwrite) = cli.overwrite {
        settings.output.overwrite = overwrite;
        cli_overrides += 1;
    }

    match &cli.command {
        Commands::Validate(args) => {
            settings.validation = override_validation(
                &settings.validation,
                args.weights,
                args.threshold,
                args.representative_set,
            )?;
            if let Some(format) = args.format {
                settings.output.format = format;
            }
            cli_overrides += [
                args.weights.is_some(),
                args.threshold.is_some(),
                args.representative_set.is_some(),
                args.format.is_some(),
            ]
            .iter()
            .filter(|set| **set)
            .count();
        }
        Commands::Compare(args) => {
            settings.validation =
                override_validation(&settings.validation, args.weights, args.threshold, None)?;
            cli_overrides += usize::from(args.weights.is_some()) + usize::from(args.threshold.is_some());
        }
        Commands::Inspect(_) => {}
    }

    if cli_overrides > 0 {
        debug!("Applied {} CLI configuration overrides", cli_overrides);
    }
    Ok(())
}

/// Rebuild a validated config with any provided values replaced
pub fn override_validation(
    base: &ValidationConfig,
    weights: Option<ContinuityWeights>,
    threshold: Option<f64>,
    representative_set: Option<RepresentativeSet>,
) -> Result<ValidationConfig, DomainError> {
    ValidationConfig::builder()
        .weights(weights.unwrap_or(*base.weights()))
        .problem_frame_threshold(threshold.unwrap_or(base.problem_frame_threshold()))
        .representative_set(representative_set.unwrap_or(base.representative_set()))
        .policy(*base.policy())
        .build()
}
