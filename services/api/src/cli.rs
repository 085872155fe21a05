use crate::demo::{run_demo, run_listings, DemoArgs, ListingsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hotel_careers::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Hotel Careers",
    about = "Serve the hotel careers API or exercise the application wizard from the command line",
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
    /// Print the open positions, optionally filtered
    Listings(ListingsArgs),
    /// Walk a sample applicant through the wizard against in-memory storage
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

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Listings(args) => run_listings(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
