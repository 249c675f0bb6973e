use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use flightnet_cli::grammar::load_grammar;
use flightnet_cli::input::read_trace;
use flightnet_cli::{logging, OutputFormat, Report};
use flightnet_core::limits::ReductionLimits;
use flightnet_core::reduce::TraceReducer;
use flightnet_core::tally::FiringTally;

#[derive(Parser)]
#[command(name = "flightnet")]
#[command(about = "Check a flight agency transition trace and count its invariants")]
#[command(version)]
struct Cli {
    /// Transition sequence, e.g. T0T1T2T5T6T9T10T11; prompted for when omitted
    trace: Option<String>,

    /// Output format: text | json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also report raw firing counts of T2, T3, T6, T7 and T11
    #[arg(long)]
    tally: bool,

    /// List every stripped cycle before the summary
    #[arg(long)]
    steps: bool,

    /// Lower the iteration bound derived from the trace length
    #[arg(long)]
    max_iterations: Option<u64>,

    /// Cycle grammar as JSON instead of the built-in flight booking cycle
    #[arg(long)]
    grammar: Option<PathBuf>,

    /// Print the cycle grammar as JSON and exit
    #[arg(long)]
    dump_grammar: bool,
}

fn main() -> Result<()> {
    logging::init("warn");

    let cli = Cli::parse();
    let grammar = load_grammar(cli.grammar.as_deref())?;

    if cli.dump_grammar {
        println!("{}", serde_json::to_string_pretty(&grammar)?);
        return Ok(());
    }

    let stdin = io::stdin();
    let trace = read_trace(cli.trace, stdin.lock(), io::stdout()).context("reading trace")?;
    info!(bytes = trace.len(), grammar = %grammar.name, "analyzing trace");

    let mut limits = ReductionLimits::default();
    if let Some(max) = cli.max_iterations {
        limits = limits.with_max_iterations(max);
    }
    let reducer = TraceReducer::new(&grammar).with_limits(limits);

    let mut steps = Vec::new();
    let result = if cli.steps {
        reducer.reduce_observed(&trace, |step| steps.push(step.clone()))?
    } else {
        reducer.reduce(&trace)?
    };

    let mut report = Report::new(result).with_steps(steps);
    if cli.tally {
        report = report.with_tally(FiringTally::from_trace(&trace));
    }
    print!("{}", report.render(cli.format)?);
    if cli.format == OutputFormat::Json {
        println!();
    }
    Ok(())
}
