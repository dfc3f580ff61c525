//! `typeforge switch`: toggle files between mock and live code.

use serde_json::json;
use tracing::{info, instrument};

use typeforge_adapters::LocalFilesystem;
use typeforge_core::application::{SwitchReport, SwitchService};
use typeforge_core::domain::SwitchMode;

use crate::{
    cli::{OutputFormat, SwitchArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(mode = ?args.mode, dry_run = args.dry_run))]
pub fn execute(args: SwitchArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let mode = SwitchMode::from(args.mode);
    let service = SwitchService::new(Box::new(LocalFilesystem::new())).dry_run(args.dry_run);

    let mut files = args.files;
    if let Some(dir) = &args.dir {
        files.extend(service.discover(
            dir,
            &config.switch.extension,
            args.pattern.as_deref(),
            &config.switch.skip_dirs,
        )?);
    }
    if files.is_empty() {
        return Err(CliError::NoFilesFound { dir: args.dir });
    }

    let spinner = output.spinner(&format!("Switching {} files to {mode}...", files.len()));
    let report = service.switch(mode, &files);
    spinner.finish_and_clear();

    if output.format() == OutputFormat::Json {
        output.json(&report_json(&report, args.dry_run))?;
    } else {
        print_report(&service, &report, args.dry_run, &output)?;
    }
    info!(changed = report.changed.len(), failed = report.failed.len(), "Switch finished");

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::SwitchFailed {
            failed: report.failed.len(),
            total: report.total(),
        })
    }
}

fn print_report(
    service: &SwitchService,
    report: &SwitchReport,
    dry_run: bool,
    output: &OutputManager,
) -> CliResult<()> {
    let verb = if dry_run { "would switch" } else { "switched" };
    output.header(&format!("Switch to {} mode", report.mode))?;

    for path in &report.processed {
        if !report.changed.contains(path) {
            output.file("unchanged", path)?;
            continue;
        }
        output.file(verb, path)?;
        if dry_run && !output.is_quiet() {
            for region in service.inspect(path)? {
                output.print(&format!(
                    "            {} region, lines {}-{}",
                    region.tag, region.start_line, region.end_line
                ))?;
            }
        }
    }
    for (path, error) in &report.failed {
        output.error(&format!("{}: {error}", path.display()))?;
    }

    if report.is_success() {
        output.success(&format!(
            "{} of {} files {verb}",
            report.changed.len(),
            report.total()
        ))?;
    }
    Ok(())
}

fn report_json(report: &SwitchReport, dry_run: bool) -> serde_json::Value {
    json!({
        "mode": report.mode.to_string(),
        "dry_run": dry_run,
        "processed": report.processed,
        "changed": report.changed,
        "failed": report
            .failed
            .iter()
            .map(|(path, error)| json!({ "path": path, "error": error.to_string() }))
            .collect::<Vec<_>>(),
    })
}
