//! Abstract build commands.
//!
//! A [`BuildCommand`] names what should run (a target of one of the two
//! toolchains against a solution or project file) without knowing how the
//! tool is spawned. Equality covers only the identity fields, so arguments
//! added by a prepare hook never defeat deduplication.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::Serialize;

/// The two mutually exclusive external tool families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Toolchain {
    /// IDE command line tool (`mdtool`)
    MdTool,
    /// Build engine (`xbuild`)
    XBuild,
}

impl Toolchain {
    /// Default executable name.
    pub fn program(&self) -> &'static str {
        match self {
            Toolchain::MdTool => "mdtool",
            Toolchain::XBuild => "xbuild",
        }
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// The action a command performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildTarget {
    Build,
    Archive,
    PackageForAndroid,
    SignAndroidPackage,
}

impl BuildTarget {
    /// Target name as the given toolchain spells it.
    pub fn name_for(&self, toolchain: Toolchain) -> &'static str {
        match (toolchain, self) {
            (Toolchain::MdTool, BuildTarget::Build) => "build",
            (Toolchain::MdTool, BuildTarget::Archive) => "archive",
            (_, BuildTarget::Build) => "Build",
            (_, BuildTarget::Archive) => "Archive",
            (_, BuildTarget::PackageForAndroid) => "PackageForAndroid",
            (_, BuildTarget::SignAndroidPackage) => "SignAndroidPackage",
        }
    }
}

/// A single planned tool invocation.
#[derive(Debug, Clone, Serialize)]
pub struct BuildCommand {
    toolchain: Toolchain,
    target: BuildTarget,
    path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    configuration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_name: Option<String>,
    build_ipa: bool,
    archive_on_build: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    extra_args: Vec<String>,
    #[serde(skip)]
    env: Vec<(String, String)>,
}

impl BuildCommand {
    /// Create a command running `target` of `toolchain` against `path`.
    pub fn new(toolchain: Toolchain, target: BuildTarget, path: impl Into<PathBuf>) -> Self {
        BuildCommand {
            toolchain,
            target,
            path: path.into(),
            configuration: None,
            platform: None,
            project_name: None,
            build_ipa: false,
            archive_on_build: false,
            extra_args: Vec::new(),
            env: Vec::new(),
        }
    }

    pub(crate) fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = Some(configuration.into());
        self
    }

    pub(crate) fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub(crate) fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    pub(crate) fn with_build_ipa(mut self, build_ipa: bool) -> Self {
        self.build_ipa = build_ipa;
        self
    }

    pub(crate) fn with_archive_on_build(mut self, archive: bool) -> Self {
        self.archive_on_build = archive;
        self
    }

    /// Append an extra tool argument. Does not affect command identity.
    pub fn push_arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Append several extra tool arguments.
    pub fn push_args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the tool process.
    pub fn set_env(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn toolchain(&self) -> Toolchain {
        self.toolchain
    }

    pub fn target(&self) -> BuildTarget {
        self.target
    }

    /// Solution or project file the command runs against.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn configuration(&self) -> Option<&str> {
        self.configuration.as_deref()
    }

    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    pub fn build_ipa(&self) -> bool {
        self.build_ipa
    }

    pub fn archive_on_build(&self) -> bool {
        self.archive_on_build
    }

    pub fn extra_args(&self) -> &[String] {
        &self.extra_args
    }

    pub fn env(&self) -> &[(String, String)] {
        &self.env
    }

    /// Tool arguments, without the program itself.
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::new();

        match self.toolchain {
            Toolchain::MdTool => {
                args.push(self.target.name_for(self.toolchain).to_string());
                if let Some(configuration) = &self.configuration {
                    let config = match &self.platform {
                        Some(platform) => format!("{}|{}", configuration, platform),
                        None => configuration.clone(),
                    };
                    args.push(format!("-c:{}", config));
                }
                if let Some(name) = &self.project_name {
                    args.push(format!("-p:{}", name));
                }
                args.push(self.path.display().to_string());
            }
            Toolchain::XBuild => {
                args.push(self.path.display().to_string());
                args.push(format!("/target:{}", self.target.name_for(self.toolchain)));
                if let Some(configuration) = &self.configuration {
                    args.push(format!("/p:Configuration={}", configuration));
                }
                if let Some(platform) = &self.platform {
                    args.push(format!("/p:Platform={}", platform));
                }
                if self.build_ipa {
                    args.push("/p:BuildIpa=true".to_string());
                }
                if self.archive_on_build {
                    args.push("/p:ArchiveOnBuild=true".to_string());
                }
                args.push("/verbosity:minimal".to_string());
            }
        }

        args.extend(self.extra_args.iter().cloned());
        args
    }

    /// Render the command line with the given program.
    pub fn display_with(&self, program: &str) -> String {
        let mut parts = vec![quote(program)];
        parts.extend(self.args().iter().map(|a| quote(a)));
        parts.join(" ")
    }
}

fn quote(arg: &str) -> String {
    if arg.contains(char::is_whitespace) {
        format!("\"{}\"", arg)
    } else {
        arg.to_string()
    }
}

impl fmt::Display for BuildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with(self.toolchain.program()))
    }
}

impl PartialEq for BuildCommand {
    fn eq(&self, other: &Self) -> bool {
        self.toolchain == other.toolchain
            && self.target == other.target
            && self.path == other.path
            && self.configuration == other.configuration
            && self.platform == other.platform
            && self.project_name == other.project_name
            && self.build_ipa == other.build_ipa
            && self.archive_on_build == other.archive_on_build
    }
}

impl Eq for BuildCommand {}

impl Hash for BuildCommand {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.toolchain.hash(state);
        self.target.hash(state);
        self.path.hash(state);
        self.configuration.hash(state);
        self.platform.hash(state);
        self.project_name.hash(state);
        self.build_ipa.hash(state);
        self.archive_on_build.hash(state);
    }
}
