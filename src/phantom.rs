//! Mirrors a directory tree with empty files, for building test fixtures
//! out of real datasets without copying their contents.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Recreates every directory under `source` beneath `phantom` and touches an
/// empty file for every file. Existing files in `phantom` are left as they
/// are. Returns the number of files visited.
pub fn phantomize(source: &Path, phantom: &Path) -> Result<usize> {
    if !source.is_dir() {
        anyhow::bail!(
            "Source directory {} does not exist or is not a directory",
            source.display()
        );
    }
    fs::create_dir_all(phantom)
        .with_context(|| format!("Failed to create {}", phantom.display()))?;
    let mut created = 0;
    visit_dir(source, phantom, &mut created)?;
    Ok(created)
}

fn visit_dir(dir: &Path, target: &Path, created: &mut usize) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?;
    for entry_res in entries {
        let entry = entry_res?;
        let path = entry.path();
        let mirrored = target.join(entry.file_name());
        if path.is_dir() {
            fs::create_dir_all(&mirrored)
                .with_context(|| format!("Failed to create {}", mirrored.display()))?;
            visit_dir(&path, &mirrored, created)?;
        } else if path.is_file() {
            if !mirrored.exists() {
                fs::File::create(&mirrored)
                    .with_context(|| format!("Failed to create {}", mirrored.display()))?;
            }
            debug!(path = %mirrored.display(), "Phantom file");
            *created += 1;
        }
    }
    Ok(())
}
