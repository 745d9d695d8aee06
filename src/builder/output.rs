//! Build output discovery.
//!
//! After a build, each buildable project is probed at fixed locations for the
//! artifacts its type produces. A probe that finds nothing is not an error;
//! only I/O failures and unreadable Android manifests abort collection.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use crate::builder::errors::BuildError;
use crate::builder::filter::{resolve_config, ProjectFilter};
use crate::builder::util::solution_config_key;
use crate::core::{OutputType, Project, ProjectConfig, ProjectType};
use crate::util::fs::{escaped_dir, find_files_recursive, glob_prefixed, newest, read_to_string};

/// Discovered artifacts per project type.
pub type OutputMap = BTreeMap<ProjectType, BTreeMap<OutputType, PathBuf>>;

static MANIFEST_PACKAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<manifest\b[^>]*?\bpackage\s*=\s*["']([^"']+)["']"#)
        .expect("manifest package regex is valid")
});

/// Default Xcode archive store (`~/Library/Developer/Xcode/Archives`).
pub fn default_archives_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| {
        b.home_dir()
            .join("Library")
            .join("Developer")
            .join("Xcode")
            .join("Archives")
    })
}

/// Newest `<assembly>*.xcarchive` in any dated folder of the archive store.
pub fn latest_xcarchive(archives_dir: &Path, assembly: &str) -> Result<Option<PathBuf>> {
    let dated = format!("{}/*", escaped_dir(archives_dir));
    newest(glob_prefixed(&dated, assembly, ".xcarchive")?)
}

/// Newest `<assembly>*.ipa` anywhere below the output directory.
pub fn latest_ipa(output_dir: &Path, assembly: &str) -> Result<Option<PathBuf>> {
    newest(find_files_recursive(output_dir, assembly, ".ipa")?)
}

/// Newest `<assembly>*.app.dSYM` in the output directory.
pub fn latest_dsym(output_dir: &Path, assembly: &str) -> Result<Option<PathBuf>> {
    newest(glob_prefixed(&escaped_dir(output_dir), assembly, ".app.dSYM")?)
}

/// Newest `<assembly>*.app` bundle in the output directory.
pub fn latest_app(output_dir: &Path, assembly: &str) -> Result<Option<PathBuf>> {
    newest(glob_prefixed(&escaped_dir(output_dir), assembly, ".app")?)
}

/// Newest `<assembly>*.pkg` in the output directory.
pub fn latest_pkg(output_dir: &Path, assembly: &str) -> Result<Option<PathBuf>> {
    newest(glob_prefixed(&escaped_dir(output_dir), assembly, ".pkg")?)
}

/// Newest `<package>*.apk` in the output directory, preferring signed ones.
pub fn latest_apk(output_dir: &Path, package_name: &str) -> Result<Option<PathBuf>> {
    let candidates = glob_prefixed(&escaped_dir(output_dir), package_name, ".apk")?;

    let (signed, unsigned): (Vec<_>, Vec<_>) = candidates.into_iter().partition(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy().ends_with("-Signed.apk"))
            .unwrap_or(false)
    });

    if signed.is_empty() {
        newest(unsigned)
    } else {
        newest(signed)
    }
}

/// Package name declared by an `AndroidManifest.xml`.
pub fn android_package_name(manifest: &Path) -> Result<String> {
    let contents = read_to_string(manifest)?;

    MANIFEST_PACKAGE
        .captures(&contents)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            BuildError::MissingPackageName {
                path: manifest.to_path_buf(),
            }
            .into()
        })
}

/// Probes build outputs of buildable projects.
#[derive(Debug, Clone)]
pub struct OutputCollector<'a> {
    filter: ProjectFilter<'a>,
    archives_dir: Option<PathBuf>,
    force_mdtool: bool,
}

impl<'a> OutputCollector<'a> {
    pub fn new(filter: ProjectFilter<'a>, archives_dir: Option<PathBuf>, force_mdtool: bool) -> Self {
        OutputCollector {
            filter,
            archives_dir,
            force_mdtool,
        }
    }

    /// Collect the outputs of a `configuration|platform` build.
    pub fn collect(&self, configuration: &str, platform: &str) -> Result<OutputMap> {
        let mut output_map = OutputMap::new();
        let solution_config = solution_config_key(configuration, platform);

        let (projects, _) = self.filter.buildable_projects(configuration, platform);

        for project in projects {
            let Ok(config) = resolve_config(project, &solution_config) else {
                continue;
            };

            let found = self.probe(project, config)?;
            if found.is_empty() {
                continue;
            }

            for (kind, path) in &found {
                tracing::debug!("found {} for {}: {}", kind, project.name, path.display());
            }
            output_map
                .entry(project.project_type)
                .or_default()
                .extend(found);
        }

        Ok(output_map)
    }

    fn probe(&self, project: &Project, config: &ProjectConfig) -> Result<BTreeMap<OutputType, PathBuf>> {
        let mut found = BTreeMap::new();
        let assembly = project.assembly_name();
        let output_dir = &config.output_dir;

        let mut record = |kind: OutputType, path: Option<PathBuf>| {
            if let Some(path) = path {
                found.insert(kind, path);
            }
        };

        match project.project_type {
            ProjectType::Ios | ProjectType::TvOs => {
                record(OutputType::XcArchive, self.latest_xcarchive(assembly)?);
                record(OutputType::Ipa, latest_ipa(output_dir, assembly)?);
                record(OutputType::Dsym, latest_dsym(output_dir, assembly)?);
            }
            ProjectType::MacOs => {
                if self.force_mdtool {
                    record(OutputType::XcArchive, self.latest_xcarchive(assembly)?);
                }
                record(OutputType::App, latest_app(output_dir, assembly)?);
                record(OutputType::Pkg, latest_pkg(output_dir, assembly)?);
            }
            ProjectType::Android => {
                let package_name = android_package_name(&project.manifest_path())?;
                record(OutputType::Apk, latest_apk(output_dir, &package_name)?);
            }
            ProjectType::Unknown => {}
        }

        Ok(found)
    }

    fn latest_xcarchive(&self, assembly: &str) -> Result<Option<PathBuf>> {
        match &self.archives_dir {
            Some(dir) => latest_xcarchive(dir, assembly),
            None => Ok(None),
        }
    }
}
