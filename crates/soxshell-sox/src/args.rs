//! Argument construction for each sox verb.
//!
//! These are pure functions: they only build a [`SoxCommand`] and never touch
//! the filesystem or start a process.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use soxshell_core::{Error, Result};

use crate::command::SoxCommand;

/// Suffix appended to the input path for [`trim`] output.
pub const TRIMMED_SUFFIX: &str = "_trimmed.wav";

/// Suffix appended to the input path for [`fade`] output.
pub const FADED_SUFFIX: &str = "_faded.wav";

/// Fade curve shapes accepted by the sox `fade` effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FadeCurve {
    /// `q`: quarter of a sine wave.
    QuarterSine,
    /// `h`: half a sine wave.
    HalfSine,
    /// `t`: linear.
    Linear,
    /// `l`: logarithmic.
    Logarithmic,
    /// `p`: inverted parabola.
    InvertedParabola,
}

impl FadeCurve {
    pub const ALL: [FadeCurve; 5] = [
        FadeCurve::QuarterSine,
        FadeCurve::HalfSine,
        FadeCurve::Linear,
        FadeCurve::Logarithmic,
        FadeCurve::InvertedParabola,
    ];

    /// The single-letter code sox expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            FadeCurve::QuarterSine => "q",
            FadeCurve::HalfSine => "h",
            FadeCurve::Linear => "t",
            FadeCurve::Logarithmic => "l",
            FadeCurve::InvertedParabola => "p",
        }
    }
}

impl fmt::Display for FadeCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FadeCurve {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FadeCurve::ALL
            .into_iter()
            .find(|curve| curve.as_str() == s)
            .ok_or_else(|| Error::Validation(format!("invalid fade type: {s:?}")))
    }
}

/// One input to a mix, with its gain.
#[derive(Debug, Clone, PartialEq)]
pub struct MixInput {
    pub path: PathBuf,
    /// Linear volume factor passed to `-v`. `1.0` leaves the input unchanged.
    pub volume: f64,
}

impl MixInput {
    /// An input at unit gain.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            volume: 1.0,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }
}

impl From<PathBuf> for MixInput {
    fn from(path: PathBuf) -> Self {
        MixInput::new(path)
    }
}

impl From<&Path> for MixInput {
    fn from(path: &Path) -> Self {
        MixInput::new(path)
    }
}

impl From<&str> for MixInput {
    fn from(path: &str) -> Self {
        MixInput::new(path)
    }
}

/// Append `suffix` to the absolute form of `path`.
///
/// Relative paths are resolved against the current directory without
/// touching the filesystem, so the input need not exist.
pub fn derived_output(path: &Path, suffix: &str) -> Result<PathBuf> {
    let mut out: OsString = std::path::absolute(path)?.into_os_string();
    out.push(suffix);
    Ok(PathBuf::from(out))
}

/// `<bin> <path> -n stat`
pub fn length(bin: &Path, path: &Path) -> SoxCommand {
    let mut cmd = SoxCommand::new(bin);
    cmd.path_arg(path);
    cmd.args(["-n", "stat"]);
    cmd
}

/// `<bin> <path> -e signed-integer -b 16 <out> trim <start> [<length>]`
pub fn trim(bin: &Path, path: &Path, out: &Path, start: &str, length: Option<&str>) -> SoxCommand {
    let mut cmd = SoxCommand::new(bin);
    cmd.path_arg(path);
    cmd.args(["-e", "signed-integer", "-b", "16"]);
    cmd.path_arg(out);
    cmd.args(["trim", start]);
    if let Some(length) = length {
        cmd.arg(length);
    }
    cmd
}

/// `<bin> <path> <out> fade <curve> <fade_in> [<stop>] [<fade_out>]`
pub fn fade(
    bin: &Path,
    path: &Path,
    out: &Path,
    curve: FadeCurve,
    fade_in: &str,
    stop: Option<&str>,
    fade_out: Option<&str>,
) -> SoxCommand {
    let mut cmd = SoxCommand::new(bin);
    cmd.path_arg(path);
    cmd.path_arg(out);
    cmd.args(["fade", curve.as_str(), fade_in]);
    if let Some(stop) = stop {
        cmd.arg(stop);
    }
    if let Some(fade_out) = fade_out {
        cmd.arg(fade_out);
    }
    cmd
}

/// `<bin> -m -v <gain> <file> ... <out>`
pub fn mix(bin: &Path, inputs: &[MixInput], out: &Path) -> SoxCommand {
    let mut cmd = SoxCommand::new(bin);
    cmd.arg("-m");
    for input in inputs {
        cmd.arg("-v");
        cmd.arg(format_volume(input.volume));
        cmd.path_arg(&input.path);
    }
    cmd.path_arg(out);
    cmd
}

/// `<bin> <file> ... <out>`
pub fn concat<P: AsRef<Path>>(bin: &Path, files: &[P], out: &Path) -> SoxCommand {
    let mut cmd = SoxCommand::new(bin);
    for file in files {
        cmd.path_arg(file.as_ref());
    }
    cmd.path_arg(out);
    cmd
}

/// Whole numbers keep one decimal so unit gain renders as `1.0`.
fn format_volume(volume: f64) -> String {
    if volume.is_finite() && volume.fract() == 0.0 {
        format!("{volume:.1}")
    } else {
        volume.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BIN: &str = "/data/bin/sox";

    fn bin() -> &'static Path {
        Path::new(BIN)
    }

    #[test]
    fn fade_curve_accepts_known_codes() {
        for code in ["q", "h", "t", "l", "p"] {
            let curve: FadeCurve = code.parse().unwrap();
            assert_eq!(curve.as_str(), code);
        }
    }

    #[test]
    fn fade_curve_rejects_unknown_codes() {
        for code in ["", "x", "Q", "qq", "linear", " q"] {
            let err = code.parse::<FadeCurve>().unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "{code:?}: {err}");
        }
    }

    #[test]
    fn length_args() {
        let cmd = length(bin(), Path::new("song.wav"));
        assert_eq!(cmd.to_argv(), [BIN, "song.wav", "-n", "stat"]);
    }

    #[test]
    fn trim_with_and_without_length() {
        let out = Path::new("/music/song.wav_trimmed.wav");
        let with = trim(bin(), Path::new("/music/song.wav"), out, "1.5", Some("3"));
        assert_eq!(
            with.to_argv(),
            [
                BIN,
                "/music/song.wav",
                "-e",
                "signed-integer",
                "-b",
                "16",
                "/music/song.wav_trimmed.wav",
                "trim",
                "1.5",
                "3",
            ]
        );

        let without = trim(bin(), Path::new("/music/song.wav"), out, "1.5", None);
        assert_eq!(without.arguments().len() + 1, with.arguments().len());
        assert_eq!(without.arguments().last().map(String::as_str), Some("1.5"));
        assert!(without.arguments().iter().all(|a| !a.is_empty()));
    }

    #[test]
    fn fade_optional_arguments_are_omitted() {
        let input = Path::new("/music/song.wav");
        let out = Path::new("/music/song.wav_faded.wav");

        let full = fade(bin(), input, out, FadeCurve::Linear, "0.5", Some("10"), Some("2"));
        assert_eq!(
            full.to_argv(),
            [BIN, "/music/song.wav", "/music/song.wav_faded.wav", "fade", "t", "0.5", "10", "2"]
        );

        let stop_only = fade(bin(), input, out, FadeCurve::Linear, "0.5", Some("10"), None);
        assert_eq!(stop_only.arguments().len(), full.arguments().len() - 1);

        let minimal = fade(bin(), input, out, FadeCurve::HalfSine, "0", None, None);
        assert_eq!(
            minimal.arguments(),
            ["/music/song.wav", "/music/song.wav_faded.wav", "fade", "h", "0"]
        );
    }

    #[test]
    fn mix_three_files_alternates_volume_pattern() {
        let inputs: Vec<MixInput> = ["a.wav", "b.wav", "c.wav"]
            .into_iter()
            .map(MixInput::new)
            .collect();
        let cmd = mix(bin(), &inputs, Path::new("out.wav"));
        assert_eq!(
            cmd.to_argv(),
            [
                BIN, "-m", "-v", "1.0", "a.wav", "-v", "1.0", "b.wav", "-v", "1.0", "c.wav",
                "out.wav",
            ]
        );
    }

    #[test]
    fn mix_uses_per_input_volume() {
        let inputs = [
            MixInput::new("voice.wav"),
            MixInput::new("music.wav").with_volume(0.25),
            MixInput::new("fx.wav").with_volume(2.0),
        ];
        let cmd = mix(bin(), &inputs, Path::new("out.wav"));
        assert_eq!(
            cmd.arguments(),
            ["-m", "-v", "1.0", "voice.wav", "-v", "0.25", "music.wav", "-v", "2.0", "fx.wav", "out.wav"]
        );
    }

    #[test]
    fn concat_args() {
        let cmd = concat(bin(), &["intro.wav", "body.wav"], Path::new("joined.wav"));
        assert_eq!(cmd.to_argv(), [BIN, "intro.wav", "body.wav", "joined.wav"]);
    }

    #[test]
    fn derived_output_appends_suffix_to_absolute_path() {
        let out = derived_output(Path::new("/music/song.wav"), TRIMMED_SUFFIX).unwrap();
        assert_eq!(out, PathBuf::from("/music/song.wav_trimmed.wav"));
    }

    #[test]
    fn derived_output_absolutizes_relative_input() {
        let out = derived_output(Path::new("clips/song.wav"), FADED_SUFFIX).unwrap();
        let expected = std::env::current_dir()
            .unwrap()
            .join("clips/song.wav_faded.wav");
        assert!(out.is_absolute());
        assert_eq!(out, expected);
    }

    #[test]
    fn mix_input_from_path() {
        let input: MixInput = "a.wav".into();
        assert_eq!(input.path, PathBuf::from("a.wav"));
        assert_eq!(input.volume, 1.0);
    }
}
