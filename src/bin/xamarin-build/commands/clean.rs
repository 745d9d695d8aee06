//! `xamarin-build clean` command

use std::path::Path;

use anyhow::Result;

use crate::cli::CleanArgs;
use xamarin_builder::ops::{self, Overrides, Session};
use xamarin_builder::util::shell::Shell;

pub fn execute(solution: &Path, shell: &Shell, args: CleanArgs) -> Result<()> {
    let overrides = Overrides {
        project_types: args.project_types,
        ..Default::default()
    };
    let session = Session::open(solution, overrides)?;

    ops::clean(session.builder(), shell)?;
    Ok(())
}
