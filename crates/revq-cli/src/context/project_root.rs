use std::path::{Path, PathBuf};

use anyhow::Context;
use revq_config::PROJECT_DIR;

/// Pick the project root: `--project` if given, else the nearest ancestor of
/// the current directory holding `.revq`, else the current directory.
pub fn resolve_project_root(project_override: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(path) = project_override {
        let explicit = PathBuf::from(path);

        if explicit.file_name().and_then(|name| name.to_str()) == Some(PROJECT_DIR) {
            return explicit
                .parent()
                .map(Path::to_path_buf)
                .context("invalid --project path: '.revq' directory has no parent");
        }
        if explicit.is_dir() {
            return Ok(explicit);
        }
        anyhow::bail!(
            "invalid --project '{}': directory does not exist",
            explicit.display()
        );
    }

    let start = std::env::current_dir().context("failed to read current directory")?;
    Ok(find_project_root(&start).unwrap_or(start))
}

/// Walk upwards from `start` until a `.revq` directory is found.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(PROJECT_DIR).is_dir() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}
