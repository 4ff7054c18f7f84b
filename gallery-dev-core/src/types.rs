//! Identifier types with validation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Identifier of a running container, as printed by the runtime's listing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(try_from = "String", into = "String")]
pub struct ContainerId(String);

impl ContainerId {
    /// Maximum length for container IDs
    pub const MAX_LENGTH: usize = 64;

    /// Create a new `ContainerId` with validation
    ///
    /// # Errors
    /// Returns error if ID is empty, too long, starts with a dash or
    /// contains characters outside `[A-Za-z0-9_-]`
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    fn validate(id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(Error::InvalidIdentifier {
                message: "Container ID cannot be empty".to_string(),
            });
        }

        if id.len() > Self::MAX_LENGTH {
            return Err(Error::InvalidIdentifier {
                message: format!("Container ID too long (max {} chars)", Self::MAX_LENGTH),
            });
        }

        // Would be parsed as a flag by the runtime
        if id.starts_with('-') {
            return Err(Error::InvalidIdentifier {
                message: format!("Container ID cannot start with '-': {id}"),
            });
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::InvalidIdentifier {
                message: format!(
                    "Container ID can only contain alphanumeric, dash, and underscore: {id}"
                ),
            });
        }

        Ok(())
    }

    /// Parse the line-oriented output of a container listing.
    ///
    /// Each line is trimmed and blank lines are skipped. Lines that are not
    /// valid identifiers are returned in the error list instead of aborting
    /// the whole parse.
    #[must_use]
    pub fn parse_listing(output: &str) -> (Vec<Self>, Vec<Error>) {
        let mut ids = Vec::new();
        let mut rejected = Vec::new();

        for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match Self::new(line) {
                Ok(id) => ids.push(id),
                Err(e) => rejected.push(e),
            }
        }

        (ids, rejected)
    }

    /// Get the container ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ContainerId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for ContainerId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl From<ContainerId> for String {
    fn from(id: ContainerId) -> Self {
        id.0
    }
}

impl AsRef<str> for ContainerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Image reference in `repository:tag` form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageTag {
    repository: String,
    tag: String,
}

impl ImageTag {
    /// Create an image tag from its parts
    ///
    /// # Errors
    /// Returns error if either part is empty, contains whitespace, or the
    /// tag contains `:` or `/`
    pub fn new(repository: impl Into<String>, tag: impl Into<String>) -> Result<Self> {
        let repository = repository.into();
        let tag = tag.into();
        Self::validate(&repository, &tag)?;
        Ok(Self { repository, tag })
    }

    fn validate(repository: &str, tag: &str) -> Result<()> {
        // A colon in the repository is only legal as a registry port
        if repository.is_empty()
            || repository.chars().any(char::is_whitespace)
            || (repository.contains(':') && !repository.contains('/'))
        {
            return Err(Error::InvalidIdentifier {
                message: format!("Image repository is invalid: {repository:?}"),
            });
        }

        if tag.is_empty() || tag.contains([':', '/']) || tag.chars().any(char::is_whitespace) {
            return Err(Error::InvalidIdentifier {
                message: format!("Image tag is invalid: {tag:?}"),
            });
        }

        Ok(())
    }

    /// Repository part (`gallery`)
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Tag part (`development`)
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl Default for ImageTag {
    fn default() -> Self {
        Self {
            repository: "gallery".to_string(),
            tag: "development".to_string(),
        }
    }
}

impl fmt::Display for ImageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)
    }
}

impl FromStr for ImageTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (repository, tag) = s.rsplit_once(':').ok_or_else(|| Error::InvalidIdentifier {
            message: format!("Image reference must be repository:tag, got: {s}"),
        })?;
        Self::new(repository, tag)
    }
}

impl TryFrom<String> for ImageTag {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ImageTag> for String {
    fn from(tag: ImageTag) -> Self {
        tag.to_string()
    }
}
