//! Shared helpers for CLI commands: project root resolution and policy loading.

use std::path::{Path, PathBuf};

use kiln_config::{BuildPolicy, CONFIG_FILE_NAME};
use tracing::debug;

use crate::GlobalArgs;

/// A project directory together with the policy that applies to it.
pub struct Project {
    /// Directory that source and output paths are relative to.
    pub root: PathBuf,
    /// The loaded (or default) build policy.
    pub policy: BuildPolicy,
}

/// Walks up from `start` looking for the nearest directory containing `kiln.toml`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE_NAME).is_file() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Resolves the project root and its policy from global CLI args.
///
/// If `--config` names a file, that file is loaded and its parent directory is
/// the root. If it names a directory, that directory is the root. Otherwise the
/// nearest ancestor with a `kiln.toml` is used, falling back to the current
/// directory with the default policy.
pub fn resolve_project(global: &GlobalArgs) -> Result<Project, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            let root = p
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            let policy = kiln_config::load_config_file(&p)?;
            debug!(config = %p.display(), "loaded explicit configuration");
            return Ok(Project { root, policy });
        }
        if p.is_dir() {
            let policy = kiln_config::load_config(&p)?;
            return Ok(Project { root: p, policy });
        }
        return Err(format!("configuration path '{config_path}' does not exist").into());
    }

    let cwd = std::env::current_dir()?;
    match find_project_root(&cwd) {
        Some(root) => {
            debug!(root = %root.display(), "found {CONFIG_FILE_NAME}");
            let policy = kiln_config::load_config(&root)?;
            Ok(Project { root, policy })
        }
        None => {
            debug!("no {CONFIG_FILE_NAME} found, using default policy");
            Ok(Project {
                root: cwd,
                policy: BuildPolicy::default(),
            })
        }
    }
}
