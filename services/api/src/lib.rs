mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use property_eval::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
