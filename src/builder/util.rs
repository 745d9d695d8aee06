//! Shared utilities for the builder module.

/// Architectures that only target the iOS/tvOS simulator.
pub const SIMULATOR_ARCHS: &[&str] = &["i386", "x86_64"];

/// Wildcard platform that must not be passed to the build engine.
pub const ANY_CPU: &str = "AnyCPU";

/// Compose the solution config key for a configuration/platform pair.
///
/// ```
/// use xamarin_builder::builder::util::solution_config_key;
///
/// assert_eq!(solution_config_key("Release", "iPhone"), "Release|iPhone");
/// ```
pub fn solution_config_key(configuration: &str, platform: &str) -> String {
    format!("{}|{}", configuration, platform)
}

/// Whether a build for these architectures can be archived for distribution.
///
/// An empty list or a list made only of simulator architectures is not
/// archivable.
pub fn is_architecture_archivable<S: AsRef<str>>(archs: &[S]) -> bool {
    archs.iter().any(|arch| {
        let arch = arch.as_ref().trim();
        !SIMULATOR_ARCHS.iter().any(|sim| sim.eq_ignore_ascii_case(arch))
    })
}

/// Whether `platform` is the AnyCPU wildcard.
pub fn is_platform_any_cpu(platform: &str) -> bool {
    platform.eq_ignore_ascii_case(ANY_CPU)
}
