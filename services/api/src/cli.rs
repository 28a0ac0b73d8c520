use crate::commands::{run_insights, run_rank, InsightsArgs, RankArgs};
use crate::server;
use candidate_ranking::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Candidate Ranking",
    about = "Rank applicant pools against job postings from the command line or over HTTP",
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
    /// Rank a candidate pool against a job posting
    Rank(RankArgs),
    /// Summarize pool quality, skill gaps and recommendations for a posting
    Insights(InsightsArgs),
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
        Command::Rank(args) => run_rank(args),
        Command::Insights(args) => run_insights(args),
    }
}
