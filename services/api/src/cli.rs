use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use topping_match::error::AppError;

use crate::demo::run_demo;
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Topping Match Kiosk",
    about = "Run the booth topping-matching chat service from the command line",
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
    /// Walk a scripted kiosk conversation on the command line
    Demo(DemoArgs),
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

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Catalog set to walk through (wraps around the catalog)
    #[arg(long, default_value_t = 0)]
    pub(crate) set: usize,
    /// Scripted answer to the allergy question
    #[arg(long, default_value = "no", value_parser = PossibleValuesParser::new(["yes", "no", "not_sure"]))]
    pub(crate) allergy: String,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
