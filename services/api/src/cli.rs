use crate::demo::{run_batch, run_demo, run_evaluate, BatchArgs, DemoArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use creditx::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "CreditX",
    about = "Run the CreditX mortgage backend or check feasibility from the command line",
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
    /// Evaluate financial snapshots without starting the server
    Feasibility {
        #[command(subcommand)]
        command: FeasibilityCommand,
    },
    /// Walk one application through the wizard and print the verdict
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum FeasibilityCommand {
    /// Evaluate a single snapshot stored as wizard JSON
    Evaluate(EvaluateArgs),
    /// Evaluate every row of a CSV export
    Batch(BatchArgs),
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
        Command::Feasibility {
            command: FeasibilityCommand::Evaluate(args),
        } => run_evaluate(args),
        Command::Feasibility {
            command: FeasibilityCommand::Batch(args),
        } => run_batch(args),
        Command::Demo(args) => run_demo(args),
    }
}
