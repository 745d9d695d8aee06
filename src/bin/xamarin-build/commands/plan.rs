//! `xamarin-build plan` command

use std::path::Path;

use anyhow::Result;

use crate::cli::SelectArgs;
use xamarin_builder::ops::{self, BuildOptions, Session};
use xamarin_builder::util::shell::Shell;

pub fn execute(solution: &Path, shell: &Shell, args: SelectArgs) -> Result<()> {
    let session = Session::open(solution, args.overrides())?;
    let (configuration, platform) = session.selection()?;

    let opts = BuildOptions {
        configuration: configuration.to_string(),
        platform: platform.to_string(),
        extra_args: args.extra_args,
    };

    let commands = ops::plan(session.builder(), shell, &opts)?;
    tracing::debug!("{} command(s) planned", commands.len());

    Ok(())
}
