//! Gray Enhance CLI - grayscale image statistics and enhancement.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{resolve_depth, Cli, Commands, ExitCode};
use config::AppConfig;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = AppConfig::load();
    let depth = resolve_depth(cli.depth, &config);

    let result = match cli.command {
        Commands::Stats(args) => commands::stats::run(&args.with_config(&config), depth),
        Commands::Stretch(args) => {
            commands::enhance::run_stretch(&args.with_config(&config), depth)
        }
        Commands::Equalize(args) => {
            commands::enhance::run_equalize(&args.with_config(&config), depth)
        }
        Commands::Remap(args) => commands::enhance::run_remap(&args.with_config(&config), depth),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error
        }
    };

    exit_code.into()
}
