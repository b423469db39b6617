//! Filesystem helpers shared by the pipeline stages.

use std::io;
use std::path::Path;

use tokio::fs;

use super::error::{ErrorExt, Result};
use crate::bail;

/// Removes a directory tree. Missing directories are not an error.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Err(e) if e.kind() != io::ErrorKind::NotFound => {
            Err(e).fs_context("removing directory", path)
        }
        _ => Ok(()),
    }
}

/// Recreates `path` as an empty directory, erasing any previous contents.
pub async fn recreate_dir(path: &Path) -> Result<()> {
    remove_dir_all(path).await?;
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Copies a regular file, creating destination parent directories as needed.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.is_file() {
        bail!("{} is not a file or does not exist", from.display());
    }
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)
            .await
            .fs_context("creating directory", parent)?;
    }
    fs::copy(from, to).await.fs_context("copying file", to)?;
    Ok(())
}
