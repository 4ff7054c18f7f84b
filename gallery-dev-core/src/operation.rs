//! The closed set of operations the helper can perform

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// A development task selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    /// Build the development image
    Build,
    /// Start a detached development container
    Start,
    /// Kill every running development container
    Stop,
    /// Open a shell in every running development container
    Shell,
    /// Run the webservice unit tests and open the reports
    WebserviceTest,
    /// Install the basic viewer's front-end libraries
    InstallBasicViewer,
    /// Build the deployment image
    BuildDeploy,
}

impl Operation {
    /// Every operation, in the order shown in usage text
    pub const ALL: [Self; 7] = [
        Self::Build,
        Self::Start,
        Self::Stop,
        Self::Shell,
        Self::WebserviceTest,
        Self::InstallBasicViewer,
        Self::BuildDeploy,
    ];

    /// Command-line names of every operation, same order as [`Self::ALL`]
    pub const NAMES: [&'static str; 7] = [
        "build",
        "start",
        "stop",
        "shell",
        "webservice-test",
        "install-basic-viewer",
        "build-deploy",
    ];

    /// Command-line name of this operation
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Shell => "shell",
            Self::WebserviceTest => "webservice-test",
            Self::InstallBasicViewer => "install-basic-viewer",
            Self::BuildDeploy => "build-deploy",
        }
    }

    /// One-line description for help output
    #[must_use]
    pub const fn about(self) -> &'static str {
        match self {
            Self::Build => "Build the development image",
            Self::Start => "Start the development container",
            Self::Stop => "Kill running development containers",
            Self::Shell => "Open a shell in running development containers",
            Self::WebserviceTest => "Run webservice unit tests and open the reports",
            Self::InstallBasicViewer => "Install libraries required by the basic viewer",
            Self::BuildDeploy => "Build the deployment image",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| Error::InvalidConfig {
                message: format!(
                    "Unknown command '{s}' (expected one of: {})",
                    Self::NAMES.join(", ")
                ),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_all() {
        for (op, name) in Operation::ALL.iter().zip(Operation::NAMES) {
            assert_eq!(op.name(), name);
        }
    }

    #[test]
    fn test_parse_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn test_parse_unknown() {
        let err = "destroy".parse::<Operation>().unwrap_err();
        assert!(err.to_string().contains("destroy"));
        assert!("Build".parse::<Operation>().is_err());
        assert!("".parse::<Operation>().is_err());
    }
}
