use crate::error::MergeError;
use crate::util::path_to_str;
use regex::Regex;
use std::{
    fs, io,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

pub const FFMPEG: &str = "ffmpeg";
const MANIFEST_NAME: &str = "filelist.txt";

/// Result of one concatenation attempt that got as far as running the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcatOutcome {
    pub success: bool,
    pub status: Option<i32>,
    /// Captured stderr, or stdout when stderr was empty.
    pub diagnostics: String,
}

/// Something that can join an ordered list of media files into one output
/// without re-encoding.
///
/// `Err` is reserved for failures to run the tool at all (missing binary,
/// manifest I/O). A tool that ran and failed is an `Ok` outcome with
/// `success == false`.
pub trait ExternalConcatenator {
    fn program(&self) -> &str;

    fn concatenate(&self, inputs: &[PathBuf], output: &Path) -> Result<ConcatOutcome, MergeError>;
}

/// Concatenation through FFmpeg's concat demuxer with stream copy.
#[derive(Debug, Clone)]
pub struct FfmpegConcatenator {
    program: String,
}

impl Default for FfmpegConcatenator {
    fn default() -> Self {
        Self::new(FFMPEG)
    }
}

impl FfmpegConcatenator {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ExternalConcatenator for FfmpegConcatenator {
    fn program(&self) -> &str {
        &self.program
    }

    fn concatenate(&self, inputs: &[PathBuf], output: &Path) -> Result<ConcatOutcome, MergeError> {
        let tmpdir = tempfile::Builder::new().prefix("m4a_merger_").tempdir()?;
        let manifest_path = tmpdir.path().join(MANIFEST_NAME);
        fs::write(&manifest_path, render_manifest(inputs)?)?;
        log::debug!("Wrote concat manifest to {}", manifest_path.display());

        let args = build_concat_args(&manifest_path, output)?;
        log::debug!("Running: {} {}", self.program, args.join(" "));

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output();
        let output = match result {
            Ok(output) => output,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(MergeError::ExternalToolMissing(self.program.clone()));
            }
            Err(e) => return Err(MergeError::Io(e)),
        };
        Ok(outcome_from_output(&output))
    }
}

fn outcome_from_output(output: &Output) -> ConcatOutcome {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let diagnostics = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout).into_owned()
    } else {
        stderr.into_owned()
    };
    ConcatOutcome {
        success: output.status.success(),
        status: output.status.code(),
        diagnostics,
    }
}

/// Quote a path for the concat demuxer: wrap in single quotes and write each
/// embedded quote as `'\''`.
fn quote_manifest_path(path: &str) -> String {
    format!("'{}'", path.replace('\'', r"'\''"))
}

/// Render the concat demuxer list, one `file '<path>'` line per input, in order.
pub fn render_manifest(inputs: &[PathBuf]) -> Result<String, MergeError> {
    let mut manifest = String::new();
    for input in inputs {
        manifest.push_str("file ");
        manifest.push_str(&quote_manifest_path(path_to_str(input)?));
        manifest.push('\n');
    }
    Ok(manifest)
}

/// Arguments for a stream-copy concatenation of `manifest` into `output`.
pub fn build_concat_args(manifest: &Path, output: &Path) -> Result<Vec<String>, MergeError> {
    Ok(vec![
        "-hide_banner".to_string(),
        "-f".to_string(),
        "concat".to_string(),
        "-safe".to_string(),
        "0".to_string(),
        "-i".to_string(),
        path_to_str(manifest)?.to_string(),
        "-c".to_string(),
        "copy".to_string(),
        "-y".to_string(),
        path_to_str(output)?.to_string(),
    ])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FFmpegVersionInfo {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

/// Parse the first line of `ffmpeg -version`. Builds like `n7.1` or
/// `N-113000-g...` carry no numeric version and yield `None`.
pub fn parse_ffmpeg_version(version_output: &str) -> Option<FFmpegVersionInfo> {
    let re = Regex::new(r"ffmpeg version n?(\d+)\.(\d+)(?:\.(\d+))?").ok()?;
    let caps = re.captures(version_output)?;
    let major = caps.get(1)?.as_str().parse().ok()?;
    let minor = caps.get(2)?.as_str().parse().ok()?;
    let patch = caps.get(3).map_or(0, |m| m.as_str().parse().unwrap_or(0));
    Some(FFmpegVersionInfo {
        major,
        minor,
        patch,
    })
}

#[derive(Debug)]
pub struct FFmpegCheckResult {
    pub version: Option<FFmpegVersionInfo>,
    pub first_line: String,
}

/// Run `<program> -version` and report what was found.
pub fn check_ffmpeg_installation(program: &str) -> Result<FFmpegCheckResult, MergeError> {
    let output = match Command::new(program)
        .arg("-version")
        .stdin(Stdio::null())
        .output()
    {
        Ok(output) => output,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(MergeError::ExternalToolMissing(program.to_string()));
        }
        Err(e) => return Err(MergeError::Io(e)),
    };
    if !output.status.success() {
        let outcome = outcome_from_output(&output);
        return Err(MergeError::ExternalToolFailed {
            program: program.to_string(),
            status: outcome.status,
            diagnostics: Some(outcome.diagnostics),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(FFmpegCheckResult {
        version: parse_ffmpeg_version(&stdout),
        first_line: stdout.lines().next().unwrap_or_default().to_string(),
    })
}
