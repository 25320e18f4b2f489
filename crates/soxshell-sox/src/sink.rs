//! Line sinks: per-invocation consumers of captured tool output.
//!
//! The runner delivers every line from both streams to one sink from a
//! single consumer loop, then calls [`LineSink::on_complete`] exactly once.
//! Sinks therefore never see concurrent calls and need no locking.

/// Which process stream a line was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    /// Standard output.
    Output,
    /// Standard error.
    Error,
}

impl StreamKind {
    /// Tag used in log output.
    pub fn tag(&self) -> &'static str {
        match self {
            StreamKind::Output => "OUTPUT",
            StreamKind::Error => "ERROR",
        }
    }
}

/// Receives the output lines of one invocation and its exit code.
pub trait LineSink: Send {
    /// Called once per line, in the order the runner received it. Lines from
    /// the two streams interleave arbitrarily.
    fn on_line(&mut self, stream: StreamKind, line: &str);

    /// Called once, after both streams reached end-of-stream and the process
    /// exited.
    fn on_complete(&mut self, exit_code: i32);
}

/// Sink that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSink;

impl LineSink for LoggingSink {
    fn on_line(&mut self, stream: StreamKind, line: &str) {
        tracing::info!(target: "sox", stream = stream.tag(), "{line}");
    }

    fn on_complete(&mut self, exit_code: i32) {
        tracing::info!(target: "sox", "Got return value: {exit_code}");
    }
}

/// Sink that keeps every line, used where the caller needs the raw output.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    lines: Vec<(StreamKind, String)>,
    exit_code: Option<i32>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured lines in delivery order.
    pub fn lines(&self) -> &[(StreamKind, String)] {
        &self.lines
    }

    /// Lines captured from one stream, in that stream's order.
    pub fn stream(&self, kind: StreamKind) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(move |(k, _)| *k == kind)
            .map(|(_, line)| line.as_str())
    }

    /// Exit code, once the invocation completed.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }
}

impl LineSink for CaptureSink {
    fn on_line(&mut self, stream: StreamKind, line: &str) {
        self.lines.push((stream, line.to_string()));
    }

    fn on_complete(&mut self, exit_code: i32) {
        self.exit_code = Some(exit_code);
    }
}

/// Duration reported by `sox <file> -n stat`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthReport {
    /// Length in seconds, `None` if no `Length` line parsed.
    pub length: Option<f64>,
    /// Exit code of the stat invocation.
    pub exit_code: i32,
}

impl LengthReport {
    /// Whether sox exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Sink that extracts the `Length` field from `stat` output.
///
/// sox prints the statistics on stderr as `Length (seconds):     2.000000`.
/// Any line starting with `Length` that splits into exactly two fields on
/// `:` is parsed; the last successfully parsed value wins.
#[derive(Debug, Clone, Default)]
pub struct LengthParser {
    length: Option<f64>,
    exit_code: Option<i32>,
}

impl LengthParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsed length so far.
    pub fn length(&self) -> Option<f64> {
        self.length
    }

    /// Exit code, once the invocation completed.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    fn parse_line(&mut self, line: &str) {
        if !line.starts_with("Length") {
            return;
        }

        let fields: Vec<&str> = line.split(':').collect();
        if fields.len() != 2 {
            return;
        }

        let value = fields[1].trim();
        match value.parse::<f64>() {
            Ok(seconds) => self.length = Some(seconds),
            Err(e) => tracing::warn!("unparseable sox length {value:?}: {e}"),
        }
    }
}

impl LineSink for LengthParser {
    fn on_line(&mut self, stream: StreamKind, line: &str) {
        tracing::debug!(target: "sox", stream = stream.tag(), "{line}");
        self.parse_line(line);
    }

    fn on_complete(&mut self, exit_code: i32) {
        self.exit_code = Some(exit_code);
    }
}
