//! `typeforge service`: generate an API-service class from a manifest.

use std::io::IsTerminal;

use tracing::{debug, instrument};

use typeforge_core::application::ServiceRequest;

use super::{generate_service, report_artifact};
use crate::{
    cli::ServiceArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(manifest = %args.manifest.display()))]
pub fn execute(args: ServiceArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = generate_service(&config);
    let spec = service.load_manifest(&args.manifest)?;
    debug!(class = %spec.class_name, methods = spec.methods.len(), "Manifest loaded");

    if args.dry_run {
        let artifact = service.service(&ServiceRequest {
            spec,
            output: None,
            force: false,
        })?;
        return match &args.output {
            Some(path) => {
                output.info(&format!(
                    "Dry run: would write {} lines to {}",
                    artifact.content.lines().count(),
                    path.display()
                ))?;
                if path.exists() && !args.force {
                    output.warning("The file exists; --force is required to overwrite it")?;
                }
                Ok(())
            }
            None => report_artifact(&artifact, "Service", &output),
        };
    }

    let force = args.force || args.yes || confirm_overwrite(&args, &output)?;

    let spinner = output.spinner(&format!("Generating {}...", spec.class_name));
    let result = service.service(&ServiceRequest {
        spec,
        output: args.output.clone(),
        force,
    });
    spinner.finish_and_clear();

    report_artifact(&result?, "Service", &output)
}

/// Ask before replacing an existing output file. Without a terminal the
/// core refuses the write instead.
fn confirm_overwrite(args: &ServiceArgs, output: &OutputManager) -> CliResult<bool> {
    let Some(path) = &args.output else {
        return Ok(false);
    };
    if !path.exists() || !std::io::stdin().is_terminal() {
        return Ok(false);
    }

    if output.confirm(&format!("{} already exists. Overwrite?", path.display()))? {
        Ok(true)
    } else {
        Err(CliError::Cancelled)
    }
}
