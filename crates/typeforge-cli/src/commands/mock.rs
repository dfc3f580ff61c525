//! `typeforge mock`: generate a typed mock data module.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use typeforge_core::application::MockRequest;

use super::{
    beside_input, generate_service, report_artifact, validate_function_name, validate_type_name,
};
use crate::{
    cli::MockArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(input = %args.input.display(), name = %args.name))]
pub fn execute(args: MockArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    validate_type_name(&args.name)?;
    validate_function_name(&args.function)?;

    let target = if args.beside_input {
        Some(beside_input(&args.input, ".dummy.ts")?)
    } else {
        args.output
    };

    // The types import is computed between these two paths, so they must
    // share a base.
    let (types_file, target) = match target {
        Some(target) => (absolute(&args.types)?, Some(absolute(&target)?)),
        None => (args.types, None),
    };
    debug!(types = %types_file.display(), "Resolved types file");

    let request = MockRequest {
        input: args.input,
        types_file,
        type_name: args.name,
        function_name: args.function,
        output: target,
        asynchronous: config.mock.asynchronous && !args.sync,
        wrapped: config.mock.wrapper && !args.no_wrapper,
        default_types_import: config.mock.default_types_import.clone(),
        response_import: config.mock.response_import.clone(),
    };

    let spinner = output.spinner("Generating mock module...");
    let result = generate_service(&config).mock(&request);
    spinner.finish_and_clear();

    report_artifact(&result?, "Mock module", &output)
}

fn absolute(path: &Path) -> CliResult<PathBuf> {
    std::path::absolute(path).with_cli_context(|| format!("Failed to resolve {}", path.display()))
}
