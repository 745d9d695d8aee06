//! Build plan generation.
//!
//! Each buildable project is turned into an ordered list of
//! [`BuildCommand`]s. The toolchain is chosen once per project type:
//! Apple projects use the IDE tool when it is forced and the build engine
//! otherwise, Android projects always use the build engine.

use std::path::{Path, PathBuf};

use crate::builder::command::{BuildCommand, BuildTarget, Toolchain};
use crate::builder::util::{is_architecture_archivable, is_platform_any_cpu};
use crate::core::{Project, ProjectConfig, ProjectType};

/// The solution-level request a plan is made for.
#[derive(Debug, Clone)]
pub struct PlanRequest<'a> {
    /// Solution file the Apple commands run against
    pub solution_path: &'a Path,
    /// Configuration requested by the caller
    pub configuration: &'a str,
    /// Platform requested by the caller
    pub platform: &'a str,
}

/// Plans commands for one toolchain.
pub trait ToolchainStrategy {
    fn toolchain(&self) -> Toolchain;

    fn plan_commands(
        &self,
        request: &PlanRequest<'_>,
        project: &Project,
        config: &ProjectConfig,
    ) -> Vec<BuildCommand>;
}

/// Plans through the IDE command line tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdeToolchain;

/// Plans through the build engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineToolchain;

impl IdeToolchain {
    fn command(
        &self,
        target: BuildTarget,
        request: &PlanRequest<'_>,
        project: &Project,
        config: &ProjectConfig,
    ) -> BuildCommand {
        BuildCommand::new(Toolchain::MdTool, target, request.solution_path)
            .with_configuration(&config.configuration)
            .with_platform(&config.platform)
            .with_project_name(&project.name)
    }
}

impl ToolchainStrategy for IdeToolchain {
    fn toolchain(&self) -> Toolchain {
        Toolchain::MdTool
    }

    fn plan_commands(
        &self,
        request: &PlanRequest<'_>,
        project: &Project,
        config: &ProjectConfig,
    ) -> Vec<BuildCommand> {
        match project.project_type {
            ProjectType::Ios | ProjectType::TvOs => {
                let mut commands = vec![self.command(BuildTarget::Build, request, project, config)];
                if is_architecture_archivable(&config.mtouch_archs) {
                    commands.push(self.command(BuildTarget::Archive, request, project, config));
                }
                commands
            }
            ProjectType::MacOs => vec![
                self.command(BuildTarget::Build, request, project, config),
                self.command(BuildTarget::Archive, request, project, config),
            ],
            ProjectType::Android | ProjectType::Unknown => Vec::new(),
        }
    }
}

impl ToolchainStrategy for EngineToolchain {
    fn toolchain(&self) -> Toolchain {
        Toolchain::XBuild
    }

    fn plan_commands(
        &self,
        request: &PlanRequest<'_>,
        project: &Project,
        config: &ProjectConfig,
    ) -> Vec<BuildCommand> {
        match project.project_type {
            ProjectType::Ios | ProjectType::TvOs => {
                let archivable = is_architecture_archivable(&config.mtouch_archs);
                let command =
                    BuildCommand::new(Toolchain::XBuild, BuildTarget::Build, request.solution_path)
                        .with_configuration(request.configuration)
                        .with_platform(request.platform)
                        .with_build_ipa(archivable)
                        .with_archive_on_build(archivable);
                vec![command]
            }
            ProjectType::MacOs => {
                let command =
                    BuildCommand::new(Toolchain::XBuild, BuildTarget::Build, request.solution_path)
                        .with_configuration(request.configuration)
                        .with_platform(request.platform)
                        .with_archive_on_build(true);
                vec![command]
            }
            ProjectType::Android => {
                let target = if config.sign_android {
                    BuildTarget::SignAndroidPackage
                } else {
                    BuildTarget::PackageForAndroid
                };

                let mut command = BuildCommand::new(Toolchain::XBuild, target, &project.path)
                    .with_configuration(&config.configuration);
                if !is_platform_any_cpu(&config.platform) {
                    command = command.with_platform(&config.platform);
                }
                vec![command]
            }
            ProjectType::Unknown => Vec::new(),
        }
    }
}

/// Turns buildable projects into commands.
#[derive(Debug, Clone)]
pub struct CommandPlanner {
    solution_path: PathBuf,
    configuration: String,
    platform: String,
    force_mdtool: bool,
}

impl CommandPlanner {
    pub fn new(
        solution_path: impl Into<PathBuf>,
        configuration: impl Into<String>,
        platform: impl Into<String>,
        force_mdtool: bool,
    ) -> Self {
        CommandPlanner {
            solution_path: solution_path.into(),
            configuration: configuration.into(),
            platform: platform.into(),
            force_mdtool,
        }
    }

    /// Toolchain strategy used for a project type, if it can be built at all.
    pub fn strategy_for(&self, project_type: ProjectType) -> Option<&'static dyn ToolchainStrategy> {
        let strategy: &'static dyn ToolchainStrategy = match project_type {
            ProjectType::Unknown => return None,
            kind if self.force_mdtool && kind.requires_executable() => &IdeToolchain,
            _ => &EngineToolchain,
        };
        Some(strategy)
    }

    /// Plan the ordered commands for one project.
    pub fn plan(&self, project: &Project, config: &ProjectConfig) -> Vec<BuildCommand> {
        let Some(strategy) = self.strategy_for(project.project_type) else {
            tracing::debug!("no toolchain for project {} ({})", project.name, project.project_type);
            return Vec::new();
        };

        let request = PlanRequest {
            solution_path: &self.solution_path,
            configuration: &self.configuration,
            platform: &self.platform,
        };

        let commands = strategy.plan_commands(&request, project, config);
        tracing::debug!(
            "planned {} {} command(s) for {}",
            commands.len(),
            strategy.toolchain(),
            project.name
        );
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{android_project, ios_project, macos_project};

    fn planner(force_mdtool: bool) -> CommandPlanner {
        CommandPlanner::new("/src/App.sln", "Release", "iPhone", force_mdtool)
    }

    fn plan(planner: &CommandPlanner, project: &Project, key: &str) -> Vec<BuildCommand> {
        planner.plan(project, &project.configs[key])
    }

    #[test]
    fn test_ios_engine_archivable() {
        let project = ios_project("App", &["arm64"]);
        let commands = plan(&planner(false), &project, "Release|iPhone");

        assert_eq!(commands.len(), 1);
        let command = &commands[0];
        assert_eq!(command.toolchain(), Toolchain::XBuild);
        assert_eq!(command.target(), BuildTarget::Build);
        assert_eq!(command.path(), Path::new("/src/App.sln"));
        assert!(command.build_ipa());
        assert!(command.archive_on_build());
        assert_eq!(command.project_name(), None);
    }

    #[test]
    fn test_ios_engine_simulator_only() {
        let project = ios_project("App", &["x86_64"]);
        let commands = plan(&planner(false), &project, "Release|iPhone");

        assert_eq!(commands.len(), 1);
        assert!(!commands[0].build_ipa());
        assert!(!commands[0].archive_on_build());
    }

    #[test]
    fn test_ios_engine_uses_requested_config() {
        let mut project = ios_project("App", &["arm64"]);
        let config = project.configs.get_mut("Release|iPhone").unwrap();
        config.configuration = "AppStore".to_string();
        config.platform = "iPhone64".to_string();

        let commands = plan(&planner(false), &project, "Release|iPhone");
        assert_eq!(commands[0].configuration(), Some("Release"));
        assert_eq!(commands[0].platform(), Some("iPhone"));
    }

    #[test]
    fn test_ios_mdtool_archive_gated_on_archs() {
        let device = ios_project("App", &["ARM64"]);
        let commands = plan(&planner(true), &device, "Release|iPhone");
        let targets: Vec<_> = commands.iter().map(|c| c.target()).collect();
        assert_eq!(targets, vec![BuildTarget::Build, BuildTarget::Archive]);
        assert!(commands.iter().all(|c| c.project_name() == Some("App")));
        assert!(commands.iter().all(|c| c.toolchain() == Toolchain::MdTool));

        let simulator = ios_project("App", &["i386", "x86_64"]);
        let commands = plan(&planner(true), &simulator, "Release|iPhone");
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].target(), BuildTarget::Build);
    }

    #[test]
    fn test_tvos_follows_ios_rules() {
        let mut project = ios_project("TV", &["arm64"]);
        project.project_type = ProjectType::TvOs;

        assert_eq!(plan(&planner(true), &project, "Release|iPhone").len(), 2);
        let engine = plan(&planner(false), &project, "Release|iPhone");
        assert_eq!(engine.len(), 1);
        assert!(engine[0].archive_on_build());
    }

    #[test]
    fn test_macos_mdtool_always_archives() {
        for archs in [vec![], vec!["x86_64"], vec!["arm64"]] {
            let project = macos_project("Mac", &archs);
            let commands = plan(&planner(true), &project, "Release|Any CPU");
            let targets: Vec<_> = commands.iter().map(|c| c.target()).collect();
            assert_eq!(targets, vec![BuildTarget::Build, BuildTarget::Archive]);
        }
    }

    #[test]
    fn test_macos_engine_archives_on_build() {
        let project = macos_project("Mac", &[]);
        let commands = plan(&planner(false), &project, "Release|Any CPU");

        assert_eq!(commands.len(), 1);
        assert!(commands[0].archive_on_build());
        assert!(!commands[0].build_ipa());
    }

    #[test]
    fn test_android_signed_any_cpu() {
        let project = android_project("Droid", true, true, "AnyCPU");
        let commands = plan(&planner(true), &project, "Release|Any CPU");

        assert_eq!(commands.len(), 1);
        let command = &commands[0];
        assert_eq!(command.toolchain(), Toolchain::XBuild);
        assert_eq!(command.target(), BuildTarget::SignAndroidPackage);
        assert_eq!(command.path(), project.path.as_path());
        assert_eq!(command.configuration(), Some("Release"));
        assert_eq!(command.platform(), None);
    }

    #[test]
    fn test_android_unsigned_explicit_platform() {
        let project = android_project("Droid", true, false, "x86");
        let commands = plan(&planner(false), &project, "Release|Any CPU");

        assert_eq!(commands[0].target(), BuildTarget::PackageForAndroid);
        assert_eq!(commands[0].platform(), Some("x86"));

        let lower = android_project("Droid", true, false, "anycpu");
        let commands = plan(&planner(false), &lower, "Release|Any CPU");
        assert_eq!(commands[0].platform(), None);
    }

    #[test]
    fn test_unknown_type_plans_nothing() {
        let mut project = ios_project("App", &["arm64"]);
        project.project_type = ProjectType::Unknown;

        assert!(planner(false).strategy_for(ProjectType::Unknown).is_none());
        assert!(plan(&planner(false), &project, "Release|iPhone").is_empty());
        assert!(plan(&planner(true), &project, "Release|iPhone").is_empty());
    }

    #[test]
    fn test_strategy_selection() {
        let forced = planner(true);
        assert_eq!(
            forced.strategy_for(ProjectType::Ios).unwrap().toolchain(),
            Toolchain::MdTool
        );
        assert_eq!(
            forced.strategy_for(ProjectType::Android).unwrap().toolchain(),
            Toolchain::XBuild
        );
        assert_eq!(
            planner(false).strategy_for(ProjectType::MacOs).unwrap().toolchain(),
            Toolchain::XBuild
        );
    }
}
