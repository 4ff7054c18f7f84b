//! Browser launcher selection

use gallery_dev_core::{CommandSpec, DevConfig};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Command that opens `target` with the desktop's default handler
#[must_use]
pub fn open_command(target: &Path) -> CommandSpec {
    let target = target.display().to_string();

    if cfg!(target_os = "windows") {
        // The empty argument is the window title `start` expects first
        CommandSpec::new("cmd").args(["/C", "start", ""]).arg(target)
    } else if cfg!(target_os = "macos") {
        CommandSpec::new("open").arg(target)
    } else {
        CommandSpec::new("xdg-open").arg(target)
    }
}

/// Resolve a report path against the working tree, following symlinks when
/// the file exists
#[must_use]
pub fn resolve_report(config: &DevConfig, relative: &Path) -> PathBuf {
    let joined = config.resolve(relative);
    match joined.canonicalize() {
        Ok(path) => path,
        Err(e) => {
            warn!(path = %joined.display(), error = %e, "Report not found");
            joined
        }
    }
}
