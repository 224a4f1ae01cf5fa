use std::process::ExitCode;

use clap::Parser;
use formstate::constants::DEFAULT_LOG_DIRECTIVE;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};
use output::OutputFormat;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output on stdout stays parseable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let format = OutputFormat::from_flag(cli.json);
    let outcome = match &cli.command {
        Commands::Check(args) => commands::check::run(args, format),
        Commands::Paths(args) => commands::paths::run(args, format).map(|()| true),
        Commands::Set(args) => commands::set::run(args, format).map(|()| true),
    };

    ExitCode::from(commands::exit_status(outcome, &mut std::io::stderr()))
}
