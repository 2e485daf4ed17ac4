use anyhow::{Context, Result};
use tracing::info_span;

use mirador_cli::pipeline::{AggregateOutcome, AggregateRequest, run_aggregate};
use mirador_model::AggregationOptions;
use mirador_output::{CsvConversion, SpssConversion, convert_to_csv, convert_to_spss};

use crate::cli::{AggregateArgs, Command, CsvArgs, SpssArgs};
use crate::types::CommandOutcome;

pub fn run_command(command: &Command) -> Result<CommandOutcome> {
    match command {
        Command::Aggregate(args) => run_aggregate_command(args).map(CommandOutcome::Aggregate),
        Command::Csv(args) => run_csv(args).map(CommandOutcome::Csv),
        Command::Spss(args) => run_spss(args).map(CommandOutcome::Spss),
    }
}

fn run_aggregate_command(args: &AggregateArgs) -> Result<AggregateOutcome> {
    let options = AggregationOptions::default()
        .with_sequencing(args.seq)
        .with_log_viral_load(args.log)
        .with_missing_token(args.missing.as_str());
    let request = AggregateRequest {
        input_dir: args.input_dir.clone(),
        output_dir: args.output_dir.clone(),
        config: args.config.clone(),
        options,
    };
    run_aggregate(&request)
}

fn run_csv(args: &CsvArgs) -> Result<CsvConversion> {
    let span = info_span!("csv", input = %args.input.display());
    let _guard = span.enter();
    convert_to_csv(&args.input, &args.output, &args.missing)
        .with_context(|| format!("convert {} to csv", args.input.display()))
}

fn run_spss(args: &SpssArgs) -> Result<SpssConversion> {
    let span = info_span!("spss", input = %args.input.display());
    let _guard = span.enter();
    convert_to_spss(&args.input, &args.output)
        .with_context(|| format!("convert {} for spss", args.input.display()))
}
