//! `typeforge types`: infer TypeScript declarations from a JSON sample.

use tracing::{info, instrument};

use typeforge_core::application::TypesRequest;

use super::{beside_input, generate_service, report_artifact, validate_type_name};
use crate::{cli::TypesArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(input = %args.input.display(), name = %args.name))]
pub fn execute(args: TypesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    validate_type_name(&args.name)?;

    let target = if args.beside_input {
        Some(beside_input(&args.input, ".d.ts")?)
    } else {
        args.output
    };

    let request = TypesRequest {
        input: args.input,
        type_name: args.name,
        output: target,
    };

    let spinner = output.spinner("Inferring declarations...");
    let result = generate_service(&config).types(&request);
    spinner.finish_and_clear();
    let artifact = result?;

    info!(declarations = artifact.declaration_count, "Types generated");
    report_artifact(
        &artifact,
        &format!("{} declarations", artifact.declaration_count),
        &output,
    )
}
