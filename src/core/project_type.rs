//! Project type and output artifact tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// The platform family a project targets.
///
/// Anything the loader does not recognize becomes `Unknown`; such projects
/// are never filtered in, planned or built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Ios,
    TvOs,
    MacOs,
    Android,
    Unknown,
}

impl ProjectType {
    /// Get the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Ios => "ios",
            ProjectType::TvOs => "tvos",
            ProjectType::MacOs => "macos",
            ProjectType::Android => "android",
            ProjectType::Unknown => "unknown",
        }
    }

    /// Apple project types: only executables are buildable, and these are
    /// the types the IDE tool can build.
    pub fn requires_executable(&self) -> bool {
        matches!(self, ProjectType::Ios | ProjectType::TvOs | ProjectType::MacOs)
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ios" | "xamarin.ios" => Ok(ProjectType::Ios),
            "tvos" | "xamarin.tvos" => Ok(ProjectType::TvOs),
            "macos" | "mac" | "xamarin.mac" => Ok(ProjectType::MacOs),
            "android" | "xamarin.android" => Ok(ProjectType::Android),
            _ => Err(format!(
                "invalid project type '{}'; expected 'ios', 'tvos', 'macos' or 'android'",
                s
            )),
        }
    }
}

/// Unrecognized type strings in a solution description map to `Unknown`
/// instead of failing the whole load.
impl<'de> Deserialize<'de> for ProjectType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or(ProjectType::Unknown))
    }
}

/// Kind of artifact discovered after a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    /// Xcode archive bundle (`.xcarchive`)
    XcArchive,
    /// iOS installable package (`.ipa`)
    Ipa,
    /// Debug symbol bundle (`.app.dSYM`)
    Dsym,
    /// macOS application bundle (`.app`)
    App,
    /// macOS installer package (`.pkg`)
    Pkg,
    /// Android package (`.apk`)
    Apk,
}

impl OutputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputType::XcArchive => "xcarchive",
            OutputType::Ipa => "ipa",
            OutputType::Dsym => "dsym",
            OutputType::App => "app",
            OutputType::Pkg => "pkg",
            OutputType::Apk => "apk",
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_project_type() {
        assert_eq!("iOS".parse::<ProjectType>().unwrap(), ProjectType::Ios);
        assert_eq!("Xamarin.Mac".parse::<ProjectType>().unwrap(), ProjectType::MacOs);
        assert_eq!("android".parse::<ProjectType>().unwrap(), ProjectType::Android);
        assert!("windows".parse::<ProjectType>().is_err());
    }

    #[test]
    fn test_deserialize_unknown_type() {
        #[derive(Deserialize)]
        struct Holder {
            kind: ProjectType,
        }

        let holder: Holder = toml::from_str("kind = \"uwp\"").unwrap();
        assert_eq!(holder.kind, ProjectType::Unknown);

        let holder: Holder = toml::from_str("kind = \"tvos\"").unwrap();
        assert_eq!(holder.kind, ProjectType::TvOs);
    }

    #[test]
    fn test_requires_executable() {
        assert!(ProjectType::Ios.requires_executable());
        assert!(ProjectType::TvOs.requires_executable());
        assert!(ProjectType::MacOs.requires_executable());
        assert!(!ProjectType::Android.requires_executable());
    }
}
