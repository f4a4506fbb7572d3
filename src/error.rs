use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Input path '{}' does not exist or is not a directory", .0.display())]
    InvalidInputPath(PathBuf),
    #[error("No .{extension} files found in '{}'", .dir.display())]
    NoInputFilesFound { dir: PathBuf, extension: String },
    #[error("`{0}` command not found. Please ensure it is installed and in your PATH.")]
    ExternalToolMissing(String),
    #[error("`{program}` exited with {}{}", describe_status(.status), describe_diagnostics(.diagnostics))]
    ExternalToolFailed {
        program: String,
        status: Option<i32>,
        diagnostics: Option<String>,
    },
    #[error("Output path '{}' is not writable: {reason}", .path.display())]
    OutputPathUnwritable { path: PathBuf, reason: String },
    #[error("Invalid path (not UTF-8): {}", .0.display())]
    NonUtf8Path(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

fn describe_diagnostics(diagnostics: &Option<String>) -> String {
    match diagnostics {
        Some(text) if !text.trim().is_empty() => format!(":\n{}", text.trim_end()),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_failure_without_diagnostics_is_one_line() {
        let err = MergeError::ExternalToolFailed {
            program: "ffmpeg".to_string(),
            status: Some(1),
            diagnostics: None,
        };
        assert_eq!(err.to_string(), "`ffmpeg` exited with status 1");
    }

    #[test]
    fn tool_failure_appends_diagnostics() {
        let err = MergeError::ExternalToolFailed {
            program: "ffmpeg".to_string(),
            status: Some(183),
            diagnostics: Some("filelist.txt: Invalid data found\n".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("`ffmpeg` exited with status 183:\n"));
        assert!(msg.ends_with("Invalid data found"));
    }

    #[test]
    fn signal_termination_is_described() {
        let err = MergeError::ExternalToolFailed {
            program: "ffmpeg".to_string(),
            status: None,
            diagnostics: Some("   ".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "`ffmpeg` exited with no status (terminated by signal)"
        );
    }

    #[test]
    fn missing_files_names_extension() {
        let err = MergeError::NoInputFilesFound {
            dir: PathBuf::from("basemedia"),
            extension: "m4a".to_string(),
        };
        assert_eq!(err.to_string(), "No .m4a files found in 'basemedia'");
    }
}
