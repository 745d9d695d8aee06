//! Removal of per-project build directories.

use std::path::Path;

use anyhow::Result;

use crate::builder::filter::ProjectFilter;
use crate::core::Project;
use crate::util::fs::{is_dir_exists, remove_dir_all_if_exists};

/// Directories beside a project file that hold build products.
pub const CLEAN_DIRECTORIES: &[&str] = &["bin", "obj"];

/// Deletes the `bin` and `obj` directories of filtered projects.
#[derive(Debug, Clone, Copy)]
pub struct CleanupSweeper<'a> {
    filter: ProjectFilter<'a>,
}

impl<'a> CleanupSweeper<'a> {
    pub fn new(filter: ProjectFilter<'a>) -> Self {
        CleanupSweeper { filter }
    }

    /// Remove build directories, calling `observe` before each removal.
    ///
    /// Stops at the first failure; directories removed so far stay removed.
    pub fn clean_all<F>(&self, mut observe: F) -> Result<()>
    where
        F: FnMut(&Project, &Path),
    {
        for project in self.filter.filtered_projects() {
            for name in CLEAN_DIRECTORIES {
                let dir = project.dir().join(name);
                if !is_dir_exists(&dir)? {
                    continue;
                }

                observe(project, &dir);
                tracing::debug!("removing {}", dir.display());
                remove_dir_all_if_exists(&dir)?;
            }
        }

        Ok(())
    }
}
