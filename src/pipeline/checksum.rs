//! Artifact checksums.

use std::path::Path;

use sha2::{Digest, Sha256};
use tokio::io::AsyncReadExt;

use super::error::{ErrorExt, Result};

/// SHA-256 digest of a file, hex encoded.
///
/// Reads in 8 KiB chunks so large installers never sit in memory whole.
pub async fn sha256_file(path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening file for hashing", path)?;

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];
    loop {
        let read = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hashing", path)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
