//! # Output File
//!
//! Preparing and writing the generated schema document.
//!
//! [`prepare_output`] makes sure the target exists and is writable: missing
//! parent directories are created, a missing file is initialised as `{}`,
//! and an existing file without owner read/write permission gets it back.
//! [`write_document`] then replaces the contents in full.

use std::path::Path;

use serde_json::Value;

use crate::error::CommandError;

/// Placeholder written to a new output file before the real document.
pub const PLACEHOLDER: &str = "{}";

/// Make `path` an existing, writable file.
pub async fn prepare_output(path: &Path) -> Result<(), CommandError> {
    let access = |source| CommandError::Access {
        path: path.to_path_buf(),
        source,
    };
    match tokio::fs::metadata(path).await {
        Ok(metadata) => repair_permissions(path, metadata.permissions())
            .await
            .map_err(access),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await.map_err(access)?;
                tracing::debug!(dir = %parent.display(), "created output directory");
            }
            tokio::fs::write(path, PLACEHOLDER).await.map_err(access)?;
            tracing::debug!(path = %path.display(), "initialised output placeholder");
            Ok(())
        }
        Err(e) => Err(access(e)),
    }
}

#[cfg(unix)]
async fn repair_permissions(path: &Path, mut perms: std::fs::Permissions) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = perms.mode();
    if mode & 0o600 == 0o600 {
        return Ok(());
    }
    perms.set_mode(mode | 0o600);
    tracing::debug!(path = %path.display(), "restoring owner read/write permission");
    tokio::fs::set_permissions(path, perms).await
}

#[cfg(not(unix))]
async fn repair_permissions(path: &Path, mut perms: std::fs::Permissions) -> std::io::Result<()> {
    if !perms.readonly() {
        return Ok(());
    }
    #[allow(clippy::permissions_set_readonly_false)]
    perms.set_readonly(false);
    tracing::debug!(path = %path.display(), "clearing read-only flag");
    tokio::fs::set_permissions(path, perms).await
}

/// Overwrite `path` with `document` as pretty-printed JSON.
pub async fn write_document(path: &Path, document: &Value) -> Result<(), CommandError> {
    let write = |source| CommandError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut bytes = serde_json::to_vec_pretty(document).map_err(|e| write(e.into()))?;
    bytes.push(b'\n');
    tokio::fs::write(path, bytes).await.map_err(write)
}
