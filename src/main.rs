use std::process::ExitCode;
use clap::Parser;
use crate::errors::ErrorHandler;
use crate::structs::cli::Cli;
use crate::workers::command_runner::CommandRunner;

mod structs;
mod services;
mod helpers;
mod enums;
mod errors;
mod logger;
mod config;
mod workers;
mod traits;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    let mut runner = CommandRunner::new(cli.config);
    match runner.run_command(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            ErrorHandler::handle_error(&e);
            ExitCode::from(2)
        }
    }
}
