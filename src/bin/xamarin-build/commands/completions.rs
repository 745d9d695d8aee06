//! `xamarin-build completions`: print or install a completion script.

use std::fs::File;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::CommandFactory;

use crate::cli::{Cli, CompletionsArgs};

const BIN_NAME: &str = "xamarin-build";

pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    clap_complete::generate(args.shell, &mut cmd, BIN_NAME, &mut out);
    out.flush().context("failed to write completion script")?;

    if let Some(path) = &args.output {
        tracing::info!("wrote {} completions to {}", args.shell, path.display());
    }
    Ok(())
}
