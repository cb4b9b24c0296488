use clap::Parser;
use networth::{OutputFormat, Scenario, init_logging, render};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "networth")]
#[command(about = "Year-by-year net worth projection")]
struct Args {
    /// Path to the scenario file (YAML)
    scenario: PathBuf,

    /// Number of years to project (overrides the scenario)
    #[arg(short, long, allow_negative_numbers = true)]
    years: Option<i32>,

    /// Fail on unresolvable linkage instead of valuing it at zero
    #[arg(long)]
    strict: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Write logs to networth.log in this directory instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(args.log_dir.as_deref(), &args.log_level)?;

    let mut request = Scenario::load(&args.scenario)?.into_request(args.years);
    if args.strict {
        request.options.strict_linkage = true;
    }

    let result = request.run()?;
    tracing::info!(
        years = result.year_records.len(),
        final_value = result.final_value,
        "projection finished"
    );

    println!("{}", render(&result, args.format)?);
    Ok(())
}
