#[macro_use]
extern crate tracing;

use std::process::exit;

use clap::{Parser, Subcommand};
use solarfrontier::SolarFrontierClient;
use tracing_subscriber::prelude::*;

mod show;

use show::Period;

#[derive(Parser)]
#[clap(author, version, about)]
struct Args {
    #[clap(short, long, action)]
    verbose: bool,
    #[clap(long, action, help = "print json instead of tables")]
    json: bool,
    #[clap(
        long,
        env = "SOLARFRONTIER_HOST",
        help = "address of the inverter, e.g. 192.168.50.101"
    )]
    host: String,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Checks that the inverter reports its model name.
    Check,
    /// Prints model name and nominal power.
    Info,
    /// Prints the live measurements.
    Measurements,
    /// Prints the energy yield of one period or of all periods.
    Yield {
        #[clap(value_enum, default_value = "all")]
        period: Period,
    },
    /// Reads every endpoint once.
    All,
}

fn main() {
    dotenv::dotenv().ok();

    let args = Args::parse();

    let log_level = if args.verbose {
        "info,solarfrontier=trace,reqwest=debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::builder().parse_lossy(log_level))
        .with(tracing_forest::ForestLayer::default())
        .init();

    if let Err(err) = run(args) {
        error!("{err:#}");
        exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut client = SolarFrontierClient::new(&args.host);
    debug!("using inverter at {}", client.host());

    let result = match args.command {
        Command::Check => show::check(&mut client, args.json),
        Command::Info => show::system_info(&mut client, args.json),
        Command::Measurements => show::measurements(&mut client, args.json),
        Command::Yield { period } => show::yields(&mut client, period, args.json),
        Command::All => show::all(&mut client, args.json),
    };

    client.close();
    result
}
