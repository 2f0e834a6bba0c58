//! Command implementations

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::app::{
    AppContainer, CompareRequest, DefaultAppContainer, FrameSource, InspectRequest, ValidateRequest,
};
use crate::cli::args::{CompareArgs, InspectArgs, ValidateArgs};
use crate::cli::{Cli, Commands};
use crate::config_initialization::initialize_settings;
use crate::ports::AppSettings;

/// Resolve settings, wire the container and run the requested command
pub async fn run(cli: Cli) -> Result<()> {
    let settings = initialize_settings(&cli).context("Failed to load configuration")?;
    let container = DefaultAppContainer::new(&settings);

    match cli.command {
        Commands::Validate(args) => validate(&container, &settings, args).await,
        Commands::Compare(args) => compare(&container, &settings, args).await,
        Commands::Inspect(args) => inspect(&container, args).await,
    }
}

/// Execute the validate command
pub async fn validate(container: &dyn AppContainer, settings: &AppSettings, args: ValidateArgs) -> Result<()> {
    let source = if let Some(records) = args.records {
        FrameSource::Records(records)
    } else if let Some(dir) = args.frames_dir {
        FrameSource::Directory(dir)
    } else {
        FrameSource::Frames(args.frames)
    };
    info!(source = ?source, "Starting scene validation");

    let response = container
        .validate_interactor()
        .execute(ValidateRequest {
            source,
            config: settings.validation.clone(),
            format: settings.output.format,
            output: args.output,
            overwrite: settings.output.overwrite,
        })
        .await
        .context("Scene validation failed")?;

    match &response.written_to {
        Some(path) => println!("Report written to {}", path.display()),
        None => print!("{}", with_trailing_newline(&response.rendered)),
    }

    let report = &response.document.report;
    if !report.is_clean() {
        warn!(problems = report.issue_count(), "Continuity problems found");
        if args.fail_on_problems {
            anyhow::bail!(
                "{} problem frame(s) found: {:?}",
                report.issue_count(),
                report.problem_frame_indices
            );
        }
    }
    Ok(())
}

/// Execute the compare command
pub async fn compare(container: &dyn AppContainer, settings: &AppSettings, args: CompareArgs) -> Result<()> {
    let response = container
        .compare_interactor()
        .execute(CompareRequest {
            from: args.from,
            to: args.to,
            config: settings.validation.clone(),
        })
        .await
        .context("Frame comparison failed")?;

    if args.json {
        let json = serde_json::to_string_pretty(&response)
            .context("Failed to serialize comparison to JSON")?;
        println!("{}", json);
    } else {
        print!("{}", response.summary());
    }
    Ok(())
}

/// Execute the inspect command
pub async fn inspect(container: &dyn AppContainer, args: InspectArgs) -> Result<()> {
    let response = container
        .inspect_interactor()
        .execute(InspectRequest {
            frame: args.frame,
            json: args.json,
        })
        .await
        .context("Frame inspection failed")?;

    print!("{}", with_trailing_newline(&response.summary));
    Ok(())
}

fn with_trailing_newline(text: &str) -> String {
    if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{}\n", text)
    }
}
