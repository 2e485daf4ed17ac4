use mirador_cli::pipeline::AggregateOutcome;
use mirador_output::{CsvConversion, SpssConversion};

/// What a subcommand produced, for the final report.
#[derive(Debug)]
pub enum CommandOutcome {
    Aggregate(AggregateOutcome),
    Csv(CsvConversion),
    Spss(SpssConversion),
}
