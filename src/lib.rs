//! # soxshell
//!
//! Drive the sox command-line sound editor from a host application that can
//! only launch it as a subprocess.
//!
//! The engine lives in [`soxshell_sox`]; shared errors and configuration in
//! [`soxshell_core`]. This crate re-exports both and adds logging setup for
//! hosts that do not install their own subscriber.
//!
//! ## Example
//!
//! ```no_run
//! use soxshell::{config::Config, telemetry, SoxController};
//!
//! # async fn example() -> soxshell::Result<()> {
//! let config = Config::load_or_default(Some(std::path::Path::new("soxshell.json")));
//! telemetry::init(&config.logging)?;
//!
//! let sox = SoxController::from_config(&config)?;
//! match sox.fade("/music/take1.wav", "t", "0.5", None, None).await? {
//!     Some(out) => println!("faded: {}", out.display()),
//!     None => eprintln!("sox failed"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod telemetry;

pub use soxshell_core::{config, Error, Result};
pub use soxshell_sox::{
    args, format_time_period, CaptureSink, FadeCurve, LengthParser, LengthReport, LineSink,
    LoggingSink, MixInput, ProcessRunner, SoxBinary, SoxCommand, SoxController, StreamKind,
};
