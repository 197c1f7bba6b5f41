mod cli;
mod generate;
mod infra;
mod routes;
mod server;

use oby_mapper::error::AppError;
use std::process::ExitCode;

pub async fn run() -> Result<ExitCode, AppError> {
    cli::run().await
}
