//! Argument vector for one tool invocation.

use std::fmt;
use std::path::{Path, PathBuf};

/// An ordered argument vector: the resolved program path followed by its
/// arguments. Arguments are passed to the process as-is, never through a
/// shell.
///
/// # Example
///
/// ```
/// use soxshell_sox::SoxCommand;
///
/// let mut cmd = SoxCommand::new("/data/bin/sox");
/// cmd.arg("in.wav").args(["-n", "stat"]);
/// assert_eq!(cmd.to_argv(), ["/data/bin/sox", "in.wav", "-n", "stat"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoxCommand {
    program: PathBuf,
    args: Vec<String>,
}

impl SoxCommand {
    /// Create a new command for the given program path.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl Into<String>) -> &mut Self {
        self.args.push(s.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Append a path argument.
    pub fn path_arg(&mut self, path: &Path) -> &mut Self {
        self.arg(path.to_string_lossy())
    }

    /// The program path.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments after the program path.
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// File name of the program, for error messages.
    pub fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    /// The full vector, program first.
    pub fn to_argv(&self) -> Vec<String> {
        std::iter::once(self.program.to_string_lossy().to_string())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl fmt::Display for SoxCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
