//! Filesystem infrastructure — implements the `MaterialStore` port.
//!
//! Every output goes through a temp file in the destination directory
//! (`tempfile`), is fsynced and chmod 0600, and only then renamed over the
//! target, so a proxy reloading concurrently sees either the old file or the
//! new one.

use std::collections::BTreeSet;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::application::ports::{MaterialStore, ProgressReporter};
use crate::domain::{DeploymentRequest, StoreError, TargetLayout};

/// Permission bits for every written file: owner read/write only.
pub const KEY_FILE_MODE: u32 = 0o600;

/// Production `MaterialStore` writing to the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsMaterialStore;

impl MaterialStore for FsMaterialStore {
    async fn write(
        &self,
        request: &DeploymentRequest,
        layout: &TargetLayout,
        reporter: &dyn ProgressReporter,
    ) -> Result<BTreeSet<PathBuf>, StoreError> {
        let request = request.clone();
        let layout = layout.clone();
        // Runs to completion once started: dropping the awaiting future does
        // not cancel a blocking task.
        let written = tokio::task::spawn_blocking(move || write_material(&request, &layout))
            .await
            .map_err(|e| StoreError::Write {
                path: PathBuf::new(),
                reason: format!("write task failed: {e}"),
                committed: Vec::new(),
            })??;
        for (path, digest) in &written {
            tracing::info!(path = %path.display(), sha256 = %digest, "certificate material written");
            reporter.step(&format!("wrote {}", path.display()));
        }
        Ok(written.into_iter().map(|(path, _)| path).collect())
    }
}

/// Synchronous write of all files of `layout`; returns each path with the
/// SHA-256 of its content.
///
/// All files are staged before the first rename so a failure while staging
/// leaves the previous material untouched.
///
/// # Errors
///
/// See [`StoreError`]. A rename failure reports the files already committed.
pub fn write_material(
    request: &DeploymentRequest,
    layout: &TargetLayout,
) -> Result<Vec<(PathBuf, String)>, StoreError> {
    let fullchain = read_source(request.fullchain_path())?;
    let key = read_source(request.key_path())?;

    let mut staged = Vec::new();
    for file in layout.files(request.domain()) {
        let content = file.part.assemble(&fullchain, &key);
        let digest = sha256_hex(&content);
        staged.push((stage(&file.path, &content)?, digest));
    }

    let mut committed = Vec::with_capacity(staged.len());
    for (file, digest) in staged {
        let path = file.target().to_path_buf();
        if let Err(e) = file.commit() {
            return Err(StoreError::Write {
                path,
                reason: e.to_string(),
                committed: committed.into_iter().map(|(p, _)| p).collect(),
            });
        }
        committed.push((path, digest));
    }
    Ok(committed)
}

/// Read a source file, rejecting missing or empty input.
///
/// # Errors
///
/// Returns [`StoreError::SourceUnreadable`].
pub fn read_source(path: &Path) -> Result<Vec<u8>, StoreError> {
    let bytes = std::fs::read(path).map_err(|e| StoreError::SourceUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    if bytes.is_empty() {
        return Err(StoreError::SourceUnreadable {
            path: path.to_path_buf(),
            reason: "file is empty".to_string(),
        });
    }
    Ok(bytes)
}

/// A fully written, not yet visible, replacement for `target`.
///
/// Dropping it without `commit` removes the temp file and leaves `target`
/// as it was.
pub struct StagedFile {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    /// The file this stage will replace.
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Path of the hidden temp file holding the new content.
    #[must_use]
    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    /// Atomically rename the staged content over the target.
    ///
    /// # Errors
    ///
    /// Returns the rename error; the temp file is removed.
    pub fn commit(self) -> std::io::Result<()> {
        let Self { temp, target } = self;
        temp.persist(&target).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Write `content` to a temp file beside `target`, fsynced with mode 0600.
///
/// Creates the destination directory if needed.
///
/// # Errors
///
/// Returns [`StoreError::DirectoryUnavailable`] if the directory cannot be
/// created and [`StoreError::Write`] if the temp file cannot be written.
pub fn stage(target: &Path, content: &[u8]) -> Result<StagedFile, StoreError> {
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| StoreError::DirectoryUnavailable {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let write_err = |e: std::io::Error| StoreError::Write {
        path: target.to_path_buf(),
        reason: e.to_string(),
        committed: Vec::new(),
    };
    let mut temp = tempfile::Builder::new()
        .prefix(".cert-deploy-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_err)?;
    restrict_permissions(temp.path()).map_err(write_err)?;
    temp.write_all(content).map_err(write_err)?;
    temp.as_file().sync_all().map_err(write_err)?;

    Ok(StagedFile {
        temp,
        target: target.to_path_buf(),
    })
}

fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(KEY_FILE_MODE))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
