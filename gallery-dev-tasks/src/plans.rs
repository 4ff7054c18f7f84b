//! Command construction for each operation
//!
//! Every function here is pure: it reads the configuration and returns the
//! argument vector that the dispatcher hands to the runner. Paths that end
//! up in an argument must be valid UTF-8.

use gallery_dev_core::config::utf8;
use gallery_dev_core::{BuildArgs, CommandSpec, ContainerId, DevConfig, Result};

/// Front-end files copied out of an npm package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerAsset {
    /// Directory inside `node_modules`
    pub source: &'static str,
    /// Files to copy; `*` copies the whole directory content
    pub files: &'static [&'static str],
    /// Destination directory inside the viewer
    pub dest: &'static str,
}

/// Libraries the basic viewer ships with
pub const BASIC_VIEWER_ASSETS: &[ViewerAsset] = &[
    ViewerAsset {
        source: "jquery/dist",
        files: &["jquery.min.js", "jquery.min.map", "jquery.js"],
        dest: "js",
    },
    ViewerAsset {
        source: "mustache",
        files: &["mustache.js", "mustache.min.js"],
        dest: "js",
    },
    ViewerAsset {
        source: "font-awesome/css",
        files: &["*"],
        dest: "css",
    },
    ViewerAsset {
        source: "font-awesome/fonts",
        files: &["*"],
        dest: "fonts",
    },
];

/// `docker build` for the given build-time switches
pub fn build_image(config: &DevConfig, build_args: BuildArgs) -> Result<CommandSpec> {
    let mut cmd = CommandSpec::new(&config.runtime)
        .arg("build")
        .opt("--tag", config.image.to_string());

    for pair in build_args.pairs() {
        cmd = cmd.opt("--build-arg", pair);
    }

    Ok(cmd
        .opt("--file", utf8(&config.dockerfile)?)
        .arg(utf8(&config.build_context)?)
        .in_dir(&config.workdir))
}

/// `docker run -d` serving the working tree on the published port
pub fn start_detached(config: &DevConfig) -> Result<CommandSpec> {
    Ok(CommandSpec::new(&config.runtime)
        .args(["run", "-d", "--rm"])
        .opt("-p", config.port_mapping())
        .opt("-v", config.source_mount()?)
        .opt("-v", config.log_mount()?)
        .arg(config.image.to_string()))
}

/// `docker ps` restricted to containers of the development image, one ID
/// per line
#[must_use]
pub fn list_running(config: &DevConfig) -> CommandSpec {
    CommandSpec::new(&config.runtime)
        .arg("ps")
        .opt("--filter", format!("ancestor={}", config.image))
        .opt("--format", "{{.ID}}")
}

/// `docker kill <id>`
#[must_use]
pub fn kill(config: &DevConfig, id: &ContainerId) -> CommandSpec {
    CommandSpec::new(&config.runtime)
        .arg("kill")
        .arg(id.as_str())
}

/// Interactive `bash` inside a running container
#[must_use]
pub fn exec_shell(config: &DevConfig, id: &ContainerId) -> CommandSpec {
    CommandSpec::new(&config.runtime)
        .args(["exec", "-it"])
        .arg(id.as_str())
        .arg("bash")
}

/// One-off container running the webservice unit tests
pub fn webservice_tests(config: &DevConfig) -> Result<CommandSpec> {
    Ok(CommandSpec::new(&config.runtime)
        .args(["run", "--rm"])
        .opt("-v", config.source_mount()?)
        .opt("-v", config.log_mount()?)
        .arg(config.image.to_string())
        .args(["bash", "-c"])
        .arg(format!("cd {} && phpunit", config.webservice_test_dir)))
}

/// Shell script run inside the compose service to vendor the viewer's
/// libraries into the working tree
#[must_use]
pub fn basic_viewer_script(config: &DevConfig) -> String {
    let mut steps = vec![
        format!("cd {}", config.basic_viewer_dir),
        "npm install".to_string(),
    ];

    for asset in BASIC_VIEWER_ASSETS {
        if asset.dest == "fonts" {
            steps.push("mkdir -p fonts".to_string());
        }
        let sources: Vec<String> = asset
            .files
            .iter()
            .map(|file| format!("node_modules/{}/{file}", asset.source))
            .collect();
        steps.push(format!("cp {} {}", sources.join(" "), asset.dest));
    }

    steps.push("rm -r -f node_modules".to_string());
    steps.join(" && ")
}

/// `docker-compose run <service> bash -c <script>`
#[must_use]
pub fn install_basic_viewer(config: &DevConfig) -> CommandSpec {
    CommandSpec::new(&config.compose)
        .arg("run")
        .arg(&config.compose_service)
        .args(["bash", "-c"])
        .arg(basic_viewer_script(config))
        .in_dir(&config.workdir)
}
