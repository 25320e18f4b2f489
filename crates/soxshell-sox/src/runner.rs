//! Process runner: launches a command, drains both output streams into a
//! single sink and reports the exit code.
//!
//! Both drainers push onto one bounded channel. The calling task is the only
//! consumer, so the sink sees serialized calls. The channel closes once both
//! drainers have hit end-of-stream and dropped their senders, which is the
//! completion signal: exit status alone never implies all output was read.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use soxshell_core::{Error, Result};
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::command::SoxCommand;
use crate::drain::drain;
use crate::sink::{LineSink, StreamKind};

/// Default invocation timeout: 5 minutes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Lines buffered between the drainers and the sink.
const LINE_BUFFER: usize = 256;

/// Exit code reported when the process was terminated by a signal.
pub const SIGNAL_EXIT_CODE: i32 = -1;

/// Runs commands inside a fixed working directory.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    working_dir: PathBuf,
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// Create a runner whose processes start in `working_dir`.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    /// Set the maximum execution time. `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Run `command`, delivering every output line to `sink`, and return the
    /// exit code.
    ///
    /// `sink.on_complete` is called exactly once, after the process exited and
    /// both streams were read to the end. A process killed by a signal
    /// reports [`SIGNAL_EXIT_CODE`].
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if the process cannot be spawned; nothing is drained.
    /// - [`Error::Cancelled`] if `cancel` fires, or [`Error::TimedOut`] if the
    ///   timeout elapses. The child is killed and reaped, the drainers are
    ///   stopped and `on_complete` is not called.
    pub async fn run(
        &self,
        command: &SoxCommand,
        sink: &mut dyn LineSink,
        cancel: Option<&CancellationToken>,
    ) -> Result<i32> {
        let tool = command.tool_name();
        tracing::debug!("exec: {command}");

        let mut child = Command::new(command.program())
            .args(command.arguments())
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                tracing::error!("failed to spawn {tool}: {e}");
                Error::from(e)
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::tool(&tool, "stdout was not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::tool(&tool, "stderr was not captured"))?;

        let (tx, mut rx) = mpsc::channel(LINE_BUFFER);
        let drainers = [
            tokio::spawn(drain(stderr, StreamKind::Error, tx.clone())),
            tokio::spawn(drain(stdout, StreamKind::Output, tx)),
        ];

        let deadline = sleep_or_forever(self.timeout);
        tokio::pin!(deadline);

        let mut status: Option<ExitStatus> = None;
        let mut streams_open = true;

        let outcome = loop {
            if !streams_open {
                if let Some(status) = status {
                    break Ok(status);
                }
            }

            tokio::select! {
                _ = cancelled(cancel) => {
                    break Err(Error::Cancelled { tool: tool.clone() });
                }
                _ = &mut deadline => {
                    break Err(Error::TimedOut {
                        tool: tool.clone(),
                        timeout: self.timeout.unwrap_or_default(),
                    });
                }
                event = rx.recv(), if streams_open => match event {
                    Some(event) => {
                        tracing::trace!("{} {}", event.stream.tag(), event.line);
                        sink.on_line(event.stream, &event.line);
                    }
                    None => streams_open = false,
                },
                exited = child.wait(), if status.is_none() => match exited {
                    Ok(exited) => status = Some(exited),
                    Err(e) => break Err(Error::from(e)),
                },
            }
        };

        let status = match outcome {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!("{tool}: {e}; stopping process");
                if status.is_none() {
                    if let Err(kill_err) = child.kill().await {
                        tracing::warn!("failed to kill {tool}: {kill_err}");
                    }
                }
                for handle in &drainers {
                    handle.abort();
                }
                return Err(e);
            }
        };

        for handle in drainers {
            match handle.await {
                Ok(lines) => tracing::trace!("{tool}: drained {lines} lines"),
                Err(e) => tracing::warn!("{tool}: stream reader task failed: {e}"),
            }
        }

        let exit_code = status.code().unwrap_or_else(|| {
            tracing::warn!("{tool} terminated by signal ({status})");
            SIGNAL_EXIT_CODE
        });

        sink.on_complete(exit_code);
        Ok(exit_code)
    }
}

/// Resolves when `token` is cancelled, never if there is no token.
async fn cancelled(token: Option<&CancellationToken>) {
    match token {
        Some(token) => token.cancelled().await,
        None => std::future::pending().await,
    }
}

fn sleep_or_forever(timeout: Option<Duration>) -> impl Future<Output = ()> {
    async move {
        match timeout {
            Some(d) => tokio::time::sleep(d).await,
            None => std::future::pending().await,
        }
    }
}
