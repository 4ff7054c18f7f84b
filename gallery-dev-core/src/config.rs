//! Development environment configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, ImageTag, Result};

/// Build-time switches baked into the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildArgs {
    /// Install the PHP test runner
    pub phpunit: bool,

    /// Install the PHP debugger
    pub xdebug: bool,

    /// Install the Node package manager
    pub node: bool,
}

impl BuildArgs {
    /// Everything enabled, for the development image
    #[must_use]
    pub const fn development() -> Self {
        Self {
            phpunit: true,
            xdebug: true,
            node: true,
        }
    }

    /// Everything disabled, for the deployment image
    #[must_use]
    pub const fn deploy() -> Self {
        Self {
            phpunit: false,
            xdebug: false,
            node: false,
        }
    }

    /// `NAME=0|1` pairs in the order they are passed to the build
    #[must_use]
    pub fn pairs(&self) -> [String; 3] {
        let flag = u8::from;
        [
            format!("INSTALL_PHPUNIT={}", flag(self.phpunit)),
            format!("INSTALL_XDEBUG={}", flag(self.xdebug)),
            format!("INSTALL_NODE={}", flag(self.node)),
        ]
    }
}

/// Everything the actions need to know about the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevConfig {
    /// Container runtime executable
    pub runtime: String,

    /// Compose executable
    pub compose: String,

    /// Image built and run by the actions
    pub image: ImageTag,

    /// Build definition, relative to the build context
    pub dockerfile: PathBuf,

    /// Build context
    pub build_context: PathBuf,

    /// Port published on the host
    pub host_port: u16,

    /// Port the web server listens on inside the container
    pub container_port: u16,

    /// Working tree, mounted as the web root
    pub workdir: PathBuf,

    /// Mount point of the working tree inside the container
    pub web_root: String,

    /// Host log directory, relative to the working tree
    pub host_log_dir: String,

    /// Mount point of the log directory inside the container
    pub container_log_dir: String,

    /// Compose service used for one-off package installs
    pub compose_service: String,

    /// Webservice test directory, relative to the working tree
    pub webservice_test_dir: String,

    /// Coverage report, relative to the working tree
    pub coverage_report: PathBuf,

    /// Test summary report, relative to the working tree
    pub testdox_report: PathBuf,

    /// Basic viewer directory, relative to the working tree
    pub basic_viewer_dir: String,
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            runtime: "docker".to_string(),
            compose: "docker-compose".to_string(),
            image: ImageTag::default(),
            dockerfile: PathBuf::from("Dockerfile.gallery"),
            build_context: PathBuf::from("."),
            host_port: 8080,
            container_port: 80,
            workdir: PathBuf::from("."),
            web_root: "/var/www/html".to_string(),
            host_log_dir: "logs/".to_string(),
            container_log_dir: "/var/log".to_string(),
            compose_service: "development".to_string(),
            webservice_test_dir: "gallery/webservice/test".to_string(),
            coverage_report: PathBuf::from(
                "gallery/webservice/test/results/coverage.html/index.html",
            ),
            testdox_report: PathBuf::from("gallery/webservice/test/results/testdox.html"),
            basic_viewer_dir: "gallery/viewers/basic".to_string(),
        }
    }
}

impl DevConfig {
    /// Create a configuration rooted at `workdir`
    #[must_use]
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            ..Self::default()
        }
    }

    /// Create a configuration rooted at the process working directory
    ///
    /// # Errors
    /// Returns error if the working directory cannot be determined
    pub fn from_current_dir() -> Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// Set the container runtime executable
    #[must_use]
    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = runtime.into();
        self
    }

    /// Set the compose executable
    #[must_use]
    pub fn with_compose(mut self, compose: impl Into<String>) -> Self {
        self.compose = compose.into();
        self
    }

    /// Set the published port mapping
    #[must_use]
    pub const fn with_ports(mut self, host: u16, container: u16) -> Self {
        self.host_port = host;
        self.container_port = container;
        self
    }

    /// Check the configuration before any command runs
    ///
    /// # Errors
    /// Returns error on empty program names, a zero port or a working
    /// tree path that is not valid UTF-8
    pub fn validate(&self) -> Result<()> {
        if self.runtime.trim().is_empty() {
            return Err(Error::InvalidConfig {
                message: "Container runtime program cannot be empty".to_string(),
            });
        }

        if self.compose.trim().is_empty() {
            return Err(Error::InvalidConfig {
                message: "Compose program cannot be empty".to_string(),
            });
        }

        if self.host_port == 0 || self.container_port == 0 {
            return Err(Error::InvalidConfig {
                message: format!(
                    "Port mapping must use non-zero ports, got {}:{}",
                    self.host_port, self.container_port
                ),
            });
        }

        self.source_mount()?;
        self.log_mount()?;

        Ok(())
    }

    /// `host:container` port mapping
    #[must_use]
    pub fn port_mapping(&self) -> String {
        format!("{}:{}", self.host_port, self.container_port)
    }

    /// Bind mount of the working tree onto the web root
    ///
    /// # Errors
    /// Returns error if the working tree path is not valid UTF-8
    pub fn source_mount(&self) -> Result<String> {
        Ok(format!("{}:{}", utf8(&self.workdir)?, self.web_root))
    }

    /// Bind mount of the host log directory onto the container log dir
    ///
    /// # Errors
    /// Returns error if the log directory path is not valid UTF-8
    pub fn log_mount(&self) -> Result<String> {
        let host = self.resolve(Path::new(&self.host_log_dir));
        Ok(format!("{}:{}", utf8(&host)?, self.container_log_dir))
    }

    /// Resolve a working-tree relative path
    #[must_use]
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.workdir.join(relative)
    }
}

/// Borrow a path as UTF-8; a lossy rendering would name the wrong directory
///
/// # Errors
/// Returns error if the path is not valid UTF-8
pub fn utf8(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| Error::InvalidConfig {
        message: format!("Path is not valid UTF-8: {}", path.display()),
    })
}
