use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use flightnet_cli::grammar::load_grammar;
use flightnet_cli::{logging, OutputFormat, Report};
use flightnet_core::reduce::TraceReducer;
use flightnet_core::tally::FiringTally;
use flightnet_ir::net::PetriNet;
use flightnet_ir::parse::parse_net;
use flightnet_model::policy::Policy;
use flightnet_model::simulate::{simulate, SimulationConfig, SimulationResult, SimulationStop};

#[derive(Parser)]
#[command(name = "flightnet-sim")]
#[command(about = "Fire the flight agency net and print the resulting transition trace")]
#[command(version)]
struct Cli {
    /// Seed for the firing order; equal seeds give equal traces
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Conflict policy: 1 | balanced | 2 | prioritized
    #[arg(long, default_value = "prioritized")]
    policy: Policy,

    /// Number of customers, overriding the net's initial marking
    #[arg(long)]
    clients: Option<u32>,

    /// Stop after this many firings
    #[arg(long, default_value_t = 1_000_000)]
    max_steps: usize,

    /// Petri net definition as JSON instead of the built-in agency net
    #[arg(long)]
    net: Option<PathBuf>,

    /// Run the analyzer on the generated trace and print its report
    #[arg(long)]
    analyze: bool,

    /// Output format: text | json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Serialize)]
struct SimulationOutput<'a> {
    #[serde(flatten)]
    run: &'a SimulationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a Report>,
}

fn load_net(path: Option<&PathBuf>) -> Result<PetriNet> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading net {}", path.display()))?;
            Ok(parse_net(&json).with_context(|| format!("parsing net {}", path.display()))?)
        }
        None => Ok(PetriNet::flight_agency()),
    }
}

fn main() -> Result<()> {
    logging::init("warn");

    let cli = Cli::parse();
    let net = load_net(cli.net.as_ref())?;

    let mut config = SimulationConfig::new(cli.seed)
        .with_policy(cli.policy)
        .with_max_steps(cli.max_steps);
    if let Some(clients) = cli.clients {
        config = config.with_clients(clients);
    }

    let run = simulate(&net, &config)?;
    if run.stop != SimulationStop::AllCustomersLeft {
        warn!(
            stop = ?run.stop,
            customers_left = run.customers_left,
            customers = run.customers,
            "simulation ended before every customer left"
        );
    }

    let report = if cli.analyze {
        let grammar = load_grammar(None)?;
        let result = TraceReducer::new(&grammar).reduce(&run.trace)?;
        info!(cycles = result.cycles, accepted = result.accepted(), "analyzed simulated trace");
        Some(Report::new(result).with_tally(FiringTally::from_trace(&run.trace)))
    } else {
        None
    };

    match cli.format {
        OutputFormat::Json => {
            let output = SimulationOutput {
                run: &run,
                report: report.as_ref(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("{}", run.trace);
            if let Some(report) = &report {
                print!("{report}");
            }
        }
    }
    Ok(())
}
