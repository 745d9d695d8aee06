//! `xamarin-build outputs` command

use std::path::Path;

use anyhow::Result;

use crate::cli::SelectArgs;
use xamarin_builder::ops::{self, Session};
use xamarin_builder::util::shell::Shell;

pub fn execute(solution: &Path, shell: &Shell, args: SelectArgs) -> Result<()> {
    let session = Session::open(solution, args.overrides())?;
    let (configuration, platform) = session.selection()?;

    ops::outputs(session.builder(), shell, configuration, platform)?;
    Ok(())
}
