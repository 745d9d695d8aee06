//! Implementation of `xamarin-build clean`.

use anyhow::Result;

use crate::builder::events::BuildEvent;
use crate::builder::SolutionBuilder;
use crate::util::shell::{Shell, Status};

/// Remove the build directories of every selected project.
///
/// Returns the number of directories removed.
pub fn clean(builder: &SolutionBuilder, shell: &Shell) -> Result<usize> {
    let mut removed = 0;

    builder.clean_all(|project, dir| {
        shell.event(&BuildEvent::clean(&project.name, dir));
        shell.status(Status::Removed, dir.display());
        removed += 1;
    })?;

    if removed == 0 {
        tracing::info!("nothing to clean");
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProjectType;
    use crate::test_support::{android_project, ios_project, temp_solution};
    use crate::util::shell::ShellMode;

    #[test]
    fn test_clean_counts_removed_directories() {
        let (tmp, _) = temp_solution(Vec::new());
        let mut ios = ios_project("App", &["arm64"]);
        ios.path = tmp.path().join("App/App.csproj");
        let mut droid = android_project("Droid", true, false, "AnyCPU");
        droid.path = tmp.path().join("Droid/Droid.csproj");
        for dir in ["App/bin", "App/obj", "Droid/obj"] {
            std::fs::create_dir_all(tmp.path().join(dir)).unwrap();
        }

        let solution = crate::core::Solution::new(tmp.path().join("App.sln"), Vec::new(), vec![ios, droid]);
        let builder = SolutionBuilder::new(solution, vec![ProjectType::Ios], false).unwrap();

        let shell = Shell::new(ShellMode::Json);
        assert_eq!(clean(&builder, &shell).unwrap(), 2);
        assert_eq!(clean(&builder, &shell).unwrap(), 0);
        assert!(tmp.path().join("Droid/obj").exists());
    }
}
