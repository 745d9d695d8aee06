//! xamarin-build CLI - build orchestration for Xamarin solutions

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("xamarin_builder=debug")
    } else if cli.quiet {
        EnvFilter::new("xamarin_builder=warn")
    } else {
        EnvFilter::new("xamarin_builder=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let shell = cli.shell();

    // Execute command
    match cli.command {
        Commands::Build(args) => commands::build::execute(&cli.solution, &shell, args),
        Commands::Plan(args) => commands::plan::execute(&cli.solution, &shell, args),
        Commands::Outputs(args) => commands::outputs::execute(&cli.solution, &shell, args),
        Commands::Clean(args) => commands::clean::execute(&cli.solution, &shell, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
