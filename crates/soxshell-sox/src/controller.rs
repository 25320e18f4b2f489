//! Operation facade: one async method per sox verb.
//!
//! Each call builds a fresh [`SoxCommand`] and sink, restores the binary's
//! executable bit, runs the process to completion and maps the exit code to
//! a result. A tool that runs and exits non-zero yields `Ok(None)` so batch
//! callers can move on to the next file; `Err` is reserved for invocations
//! that never produced an exit code (spawn failure, cancellation, timeout)
//! and for arguments rejected before launch.

use std::path::{Path, PathBuf};
use std::time::Duration;

use soxshell_core::config::Config;
use soxshell_core::{Error, Result};
use tokio_util::sync::CancellationToken;

use crate::args::{self, FadeCurve, MixInput, FADED_SUFFIX, TRIMMED_SUFFIX};
use crate::binary::SoxBinary;
use crate::command::SoxCommand;
use crate::runner::ProcessRunner;
use crate::sink::{CaptureSink, LengthParser, LengthReport, LineSink, LoggingSink, StreamKind};

/// Drives the sox binary.
///
/// # Example
///
/// ```no_run
/// use soxshell_sox::{SoxBinary, SoxController};
///
/// # async fn example() -> soxshell_core::Result<()> {
/// let sox = SoxController::new(SoxBinary::in_dir("/data/app/bin")?);
/// let report = sox.length("/music/take1.wav").await?;
/// if let Some(seconds) = report.length {
///     let half = (seconds / 2.0).to_string();
///     if let Some(clip) = sox.trim("/music/take1.wav", "0", Some(half.as_str())).await? {
///         println!("first half in {}", clip.display());
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SoxController {
    binary: SoxBinary,
    runner: ProcessRunner,
    cancel: Option<CancellationToken>,
}

impl SoxController {
    /// Create a controller running `binary` from its installation directory
    /// with the default timeout.
    pub fn new(binary: SoxBinary) -> Self {
        let runner = ProcessRunner::new(binary.bin_dir());
        Self {
            binary,
            runner,
            cancel: None,
        }
    }

    /// Locate the binary and apply the runner settings from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let binary = SoxBinary::discover(&config.tools)?;
        tracing::info!("using sox at {}", binary.path().display());
        Ok(Self::new(binary).with_timeout(config.runner.timeout()))
    }

    /// Set the per-invocation timeout. `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.runner = self.runner.with_timeout(timeout);
        self
    }

    /// Kill any running invocation when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn binary(&self) -> &SoxBinary {
        &self.binary
    }

    /// Retrieve the length of an audio file in seconds.
    ///
    /// `sox <path> -n stat`. The report carries the exit code; the length is
    /// returned whatever the exit code, and is `None` if no `Length` line
    /// could be parsed.
    pub async fn length(&self, path: impl AsRef<Path>) -> Result<LengthReport> {
        let path = path.as_ref();
        tracing::info!("length {}", path.display());

        let mut parser = LengthParser::new();
        let exit_code = self
            .exec(args::length(self.binary.path(), path), &mut parser)
            .await?;

        if exit_code != 0 {
            tracing::warn!("length received non-zero return code {exit_code}");
        }

        Ok(LengthReport {
            length: parser.length(),
            exit_code,
        })
    }

    /// Discard all audio outside `start` .. `start + length` (to the end when
    /// `length` is `None`), writing 16-bit signed PCM to
    /// `<abs path>_trimmed.wav`.
    ///
    /// Positions use sox time syntax (`1.5`, `0:0:1.5`, `=10`).
    pub async fn trim(
        &self,
        path: impl AsRef<Path>,
        start: &str,
        length: Option<&str>,
    ) -> Result<Option<PathBuf>> {
        let path = path.as_ref();
        let out = args::derived_output(path, TRIMMED_SUFFIX)?;
        tracing::info!("trim {} from {start} ({length:?})", path.display());

        let command = args::trim(self.binary.path(), path, &out, start, length);
        self.exec_for_output("trim", command, out).await
    }

    /// Fade the audio in (and optionally out), writing `<abs path>_faded.wav`.
    ///
    /// `curve` must be one of `q`, `h`, `t`, `l`, `p`; anything else fails
    /// with [`Error::Validation`] before a process is started. Pass `"0"` as
    /// `fade_in` for no fade-in.
    pub async fn fade(
        &self,
        path: impl AsRef<Path>,
        curve: &str,
        fade_in: &str,
        stop: Option<&str>,
        fade_out: Option<&str>,
    ) -> Result<Option<PathBuf>> {
        let path = path.as_ref();
        let curve: FadeCurve = curve.parse().inspect_err(|e| {
            tracing::error!("fade: {e}");
        })?;
        let out = args::derived_output(path, FADED_SUFFIX)?;
        tracing::info!("fade {} ({curve}, in {fade_in})", path.display());

        let command = args::fade(self.binary.path(), path, &out, curve, fade_in, stop, fade_out);
        self.exec_for_output("fade", command, out).await
    }

    /// Mix the inputs into `out` (`sox -m -v <gain> <file> ... <out>`).
    pub async fn combine_mix(
        &self,
        inputs: &[MixInput],
        out: impl AsRef<Path>,
    ) -> Result<Option<PathBuf>> {
        let out = out.as_ref();
        if inputs.is_empty() {
            return Err(Error::Validation("mix needs at least one input".into()));
        }
        if let Some(bad) = inputs.iter().find(|i| !i.volume.is_finite()) {
            return Err(Error::Validation(format!(
                "invalid volume {} for {}",
                bad.volume,
                bad.path.display()
            )));
        }
        tracing::info!("mix {} inputs -> {}", inputs.len(), out.display());

        let command = args::mix(self.binary.path(), inputs, out);
        self.exec_for_output("combine_mix", command, out.to_path_buf())
            .await
    }

    /// Concatenate the files into `out` (`sox <file> ... <out>`).
    pub async fn combine<P: AsRef<Path>>(
        &self,
        files: &[P],
        out: impl AsRef<Path>,
    ) -> Result<Option<PathBuf>> {
        let out = out.as_ref();
        if files.is_empty() {
            return Err(Error::Validation("combine needs at least one input".into()));
        }
        tracing::info!("combine {} files -> {}", files.len(), out.display());

        let command = args::concat(self.binary.path(), files, out);
        self.exec_for_output("combine", command, out.to_path_buf())
            .await
    }

    /// First line of `sox --version`, if it exits cleanly.
    pub async fn version(&self) -> Result<Option<String>> {
        let mut command = SoxCommand::new(self.binary.path());
        command.arg("--version");

        let mut sink = CaptureSink::new();
        let exit_code = self.exec(command, &mut sink).await?;
        if exit_code != 0 {
            return Ok(None);
        }

        let first = sink
            .stream(StreamKind::Output)
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string);
        Ok(first)
    }

    async fn exec(&self, command: SoxCommand, sink: &mut dyn LineSink) -> Result<i32> {
        self.binary.ensure_executable()?;
        self.runner.run(&command, sink, self.cancel.as_ref()).await
    }

    async fn exec_for_output(
        &self,
        verb: &str,
        command: SoxCommand,
        out: PathBuf,
    ) -> Result<Option<PathBuf>> {
        let exit_code = self.exec(command, &mut LoggingSink).await?;
        if exit_code != 0 {
            tracing::error!("{verb} received non-zero return code {exit_code}");
            return Ok(None);
        }
        Ok(Some(out))
    }
}
