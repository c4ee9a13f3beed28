use crate::commands::{
    run_evaluate, run_income, run_rent, run_units, EvaluateArgs, IncomeArgs, RentArgs, UnitsArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use property_eval::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Property Evaluation",
    about = "Evaluate real-estate development projects from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a project and print development cost, NOI and ROI
    Evaluate(EvaluateArgs),
    /// Look up the Census median household income for a county
    Income(IncomeArgs),
    /// Fetch the rent estimate for a property address
    Rent(RentArgs),
    /// Parse a unit mix such as `1BR:20,2BR:15`
    Units(UnitsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args).await,
        Command::Income(args) => run_income(args).await,
        Command::Rent(args) => run_rent(args),
        Command::Units(args) => run_units(args),
    }
}
