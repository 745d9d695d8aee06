//! `xamarin-build build` command

use std::path::Path;

use anyhow::Result;

use crate::cli::BuildArgs;
use xamarin_builder::ops::{self, BuildOptions, Session};
use xamarin_builder::util::shell::Shell;

pub fn execute(solution: &Path, shell: &Shell, args: BuildArgs) -> Result<()> {
    let session = Session::open(solution, args.select.overrides())?;
    let (configuration, platform) = session.selection()?;

    let opts = BuildOptions {
        configuration: configuration.to_string(),
        platform: platform.to_string(),
        extra_args: args.select.extra_args,
    };

    ops::build(session.builder(), shell, session.tools(), &opts)?;

    if !args.no_outputs {
        ops::outputs(session.builder(), shell, configuration, platform)?;
    }

    Ok(())
}
