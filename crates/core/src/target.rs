//! Build target identification
//!
//! A target names the OS environment a binary is produced for. It selects
//! the image definition under `tools/` and namespaces the image tag.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// An operating-system build environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildTarget {
    Ubuntu,
    AmazonLinux2,
}

impl BuildTarget {
    /// All supported targets.
    pub const ALL: [BuildTarget; 2] = [BuildTarget::Ubuntu, BuildTarget::AmazonLinux2];

    /// Short tag used to namespace images and select the image definition.
    pub fn tag(self) -> &'static str {
        match self {
            BuildTarget::Ubuntu => "ubuntu",
            BuildTarget::AmazonLinux2 => "amazonlinux2",
        }
    }

    /// File name of the image definition under the tools directory.
    pub fn dockerfile(self) -> String {
        format!("Dockerfile.{}", self.tag())
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Rejected target tag from user input.
#[derive(Debug, Error)]
#[error("unknown build target {0:?} (supported: ubuntu, amazonlinux2)")]
pub struct UnknownTarget(String);

impl FromStr for BuildTarget {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ubuntu" => Ok(BuildTarget::Ubuntu),
            "amazonlinux2" => Ok(BuildTarget::AmazonLinux2),
            other => Err(UnknownTarget(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_roundtrips_through_from_str() {
        for target in BuildTarget::ALL {
            assert_eq!(target.tag().parse::<BuildTarget>().unwrap(), target);
        }
    }

    #[test]
    fn display_matches_tag() {
        assert_eq!(BuildTarget::Ubuntu.to_string(), "ubuntu");
        assert_eq!(BuildTarget::AmazonLinux2.to_string(), "amazonlinux2");
    }

    #[test]
    fn dockerfile_name_is_tag_suffixed() {
        assert_eq!(BuildTarget::Ubuntu.dockerfile(), "Dockerfile.ubuntu");
        assert_eq!(BuildTarget::AmazonLinux2.dockerfile(), "Dockerfile.amazonlinux2");
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = "debian".parse::<BuildTarget>().unwrap_err();
        assert!(err.to_string().contains("debian"));
    }
}
