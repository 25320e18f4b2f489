//! Shared harness for controller integration tests.
//!
//! Installs a fake `sox` shell script into a temporary bin directory. The
//! script records its argv to `args.log` and its working directory to
//! `cwd.log`, prints stat output for `-n stat`, and changes behaviour based
//! on markers in its arguments:
//!
//! - `fail`: exit 2 after any stat output
//! - `slow`: sleep for 5 seconds first
//! - `silence` (input): stat output without a `Length` line
//! - `garbled` (input): stat output with a malformed `Length` line

use std::path::{Path, PathBuf};

use soxshell::{SoxBinary, SoxController};
use tempfile::TempDir;

const FAKE_SOX: &str = r#"#!/bin/sh
printf '%s\n' "$@" > args.log
pwd -P > cwd.log
case "$*" in
  *slow*) sleep 5 ;;
esac
if [ "$1" = "--version" ]; then
  echo "sox:      SoX v14.4.2"
  exit 0
fi
if [ "$3" = "stat" ]; then
  case "$1" in
    *silence*)
      echo "Samples read:                0" >&2
      ;;
    *garbled*)
      echo "Length (seconds):          abc" >&2
      ;;
    *)
      echo "Samples read:           544320" >&2
      echo "Length (seconds):    12.340000" >&2
      echo "Scaled by:        2147483647.0" >&2
      echo "RMS     amplitude:    0.101512" >&2
      ;;
  esac
fi
case "$*" in
  *fail*)
    echo "sox FAIL formats: can't open input file" >&2
    exit 2
    ;;
esac
exit 0
"#;

pub struct FakeSox {
    pub dir: TempDir,
}

impl FakeSox {
    /// Write the script without the executable bit; the controller must set
    /// it before running.
    pub fn install() -> Self {
        let dir = tempfile::tempdir().expect("failed to create bin dir");
        std::fs::write(dir.path().join("sox"), FAKE_SOX).expect("failed to write fake sox");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(
                dir.path().join("sox"),
                std::fs::Permissions::from_mode(0o644),
            )
            .expect("failed to set mode");
        }

        Self { dir }
    }

    pub fn bin_dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn binary_path(&self) -> PathBuf {
        self.dir.path().join("sox")
    }

    pub fn controller(&self) -> SoxController {
        SoxController::new(SoxBinary::in_dir(self.bin_dir()).expect("fake sox missing"))
    }

    /// Arguments of the last invocation (program path excluded), or `None`
    /// if the script never ran.
    pub fn recorded_args(&self) -> Option<Vec<String>> {
        let log = std::fs::read_to_string(self.dir.path().join("args.log")).ok()?;
        Some(log.lines().map(str::to_string).collect())
    }

    /// Working directory of the last invocation.
    pub fn recorded_cwd(&self) -> Option<PathBuf> {
        let log = std::fs::read_to_string(self.dir.path().join("cwd.log")).ok()?;
        Some(PathBuf::from(log.trim_end()))
    }
}
