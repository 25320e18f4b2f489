//! Location of the sox executable.
//!
//! The binary is installed by the host application into a writable directory
//! before first use. [`SoxBinary`] only resolves its absolute path and
//! restores the executable bit before each invocation.

use std::path::{Path, PathBuf};

use soxshell_core::config::ToolsConfig;
use soxshell_core::{Error, Result};

/// File name of the tool inside its installation directory.
pub const SOX_BINARY: &str = "sox";

/// Resolved path to the sox binary and its installation directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoxBinary {
    path: PathBuf,
    bin_dir: PathBuf,
}

impl SoxBinary {
    /// Use `<bin_dir>/sox`, which must already exist.
    pub fn in_dir(bin_dir: impl AsRef<Path>) -> Result<Self> {
        let bin_dir = std::path::absolute(bin_dir.as_ref())?;
        let path = bin_dir.join(SOX_BINARY);
        if !path.is_file() {
            return Err(Error::tool_not_found(SOX_BINARY, path));
        }
        Ok(Self { path, bin_dir })
    }

    /// Use an explicit binary path. Its parent becomes the installation
    /// directory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = std::path::absolute(path.as_ref())?;
        if !path.is_file() {
            return Err(Error::tool_not_found(SOX_BINARY, path));
        }
        let bin_dir = path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| Error::Validation(format!("{} has no parent", path.display())))?;
        Ok(Self { path, bin_dir })
    }

    /// Resolve from configuration.
    ///
    /// An explicit `sox_path` that exists wins, then `<bin_dir>/sox`, then a
    /// `PATH` lookup. Configured locations that do not exist are logged and
    /// skipped.
    pub fn discover(tools: &ToolsConfig) -> Result<Self> {
        if let Some(path) = tools.sox_path.as_deref() {
            match Self::from_path(path) {
                Ok(binary) => return Ok(binary),
                Err(e) => tracing::warn!("configured sox_path unusable: {e}"),
            }
        }

        if let Some(dir) = tools.bin_dir.as_deref() {
            match Self::in_dir(dir) {
                Ok(binary) => return Ok(binary),
                Err(e) => tracing::warn!("configured bin_dir unusable: {e}"),
            }
        }

        let found = which::which(SOX_BINARY).map_err(|_| {
            Error::tool_not_found(SOX_BINARY, PathBuf::from(SOX_BINARY))
        })?;
        Self::from_path(found)
    }

    /// Absolute path to the executable.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the binary lives in; invocations run here.
    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    /// Set the binary's mode to `0700`.
    ///
    /// Called before every invocation since the host may reinstall the file.
    #[cfg(unix)]
    pub fn ensure_executable(&self) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let mode = std::fs::metadata(&self.path)?.permissions().mode();
        if mode & 0o777 != 0o700 {
            tracing::debug!("chmod 700 {}", self.path.display());
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o700))?;
        }
        Ok(())
    }

    /// No permission bits to set on this platform.
    #[cfg(not(unix))]
    pub fn ensure_executable(&self) -> Result<()> {
        Ok(())
    }
}
