use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use model_risk::error::AppError;

use crate::demo::{run_assess, run_demo, AssessArgs, DemoArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Model Risk Intake Service",
    about = "Register AI models, compute inherent-risk assessments, and export inventory artifacts",
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
    /// Score a raw registration JSON file and print the assessment
    Assess(AssessArgs),
    /// Run an end-to-end registration, scoring, and export demo
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
    /// Override the scoring configuration JSON path
    #[arg(long)]
    pub(crate) scoring_config: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
        Command::Demo(args) => run_demo(args),
    }
}
