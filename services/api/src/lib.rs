mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use candidate_ranking::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
