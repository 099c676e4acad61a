//! actiongen CLI - GitHub Actions workflow generator for Swift packages

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use actiongen::sources::ManifestError;
use actiongen::util::diagnostic::{emit, SettingsSyntaxError};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli) {
        report(e, color);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("actiongen=debug")
    } else {
        EnvFilter::new("actiongen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config;

    // Execute command
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, config),
        Commands::InitConfig(args) => commands::init_config::execute(args, config),
        Commands::Show(args) => commands::show::execute(args, config),
        Commands::CheckConfig(args) => commands::check_config::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Print a fatal error, with extra detail for the errors that carry it.
fn report(e: anyhow::Error, color: bool) {
    let e = match e.downcast::<SettingsSyntaxError>() {
        Ok(syntax) => {
            eprintln!("{:?}", miette::Report::new(syntax));
            return;
        }
        Err(e) => e,
    };

    match e.chain().find_map(|cause| cause.downcast_ref::<ManifestError>()) {
        Some(manifest) => {
            eprintln!("error: {}", e);
            emit(&manifest.to_diagnostic(), color);
        }
        None => eprintln!("error: {:#}", e),
    }
}
