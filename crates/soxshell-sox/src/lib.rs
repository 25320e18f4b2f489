//! # soxshell-sox
//!
//! Runs the sox command-line sound editor as a subprocess.
//!
//! This crate provides:
//!
//! - **Binary location** ([`SoxBinary`]) -- resolve the installed sox
//!   executable and restore its executable bit before each run.
//! - **Command execution** ([`ProcessRunner`]) -- spawn a [`SoxCommand`],
//!   drain stdout and stderr concurrently into one [`LineSink`], with
//!   timeout and cancellation support.
//! - **Argument builders** ([`args`]) -- pure argument-vector construction
//!   per verb.
//! - **Operation facade** ([`SoxController`]) -- length, trim, fade, mix and
//!   concatenate.

pub mod args;
pub mod binary;
pub mod command;
pub mod controller;
pub mod drain;
pub mod runner;
pub mod sink;
pub mod time;

// ---- Re-exports for convenience ----

pub use args::{FadeCurve, MixInput, FADED_SUFFIX, TRIMMED_SUFFIX};
pub use binary::{SoxBinary, SOX_BINARY};
pub use command::SoxCommand;
pub use controller::SoxController;
pub use runner::{ProcessRunner, DEFAULT_TIMEOUT, SIGNAL_EXIT_CODE};
pub use sink::{CaptureSink, LengthParser, LengthReport, LineSink, LoggingSink, StreamKind};
pub use time::format_time_period;
