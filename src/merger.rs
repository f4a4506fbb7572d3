//! Merge orchestration: find the inputs, order them, and hand them to the
//! concatenation tool.

use crate::error::MergeError;
use crate::ffmpeg::ExternalConcatenator;
use crate::natural_sort::{CaseMode, sort_naturally};
use crate::util::display_path;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Directory used for outputs given as a bare file name.
pub const DEFAULT_OUTPUT_DIR: &str = "merged";
pub const DEFAULT_EXTENSION: &str = "m4a";

#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Container extension to collect, without the leading dot.
    pub extension: String,
    pub case: CaseMode,
    /// Keep the tool's captured output on failure.
    pub verbose: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            case: CaseMode::default(),
            verbose: false,
        }
    }
}

/// One merge invocation: where the inputs came from, their order, and the destination.
#[derive(Debug, Clone)]
pub struct MergeJob {
    pub input_dir: PathBuf,
    /// Absolute paths in natural order.
    pub files: Vec<PathBuf>,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub file_count: usize,
    pub output: PathBuf,
}

/// Place outputs that have no directory component under `merged/`. Paths
/// without a file name (`.`, `..`, `/`) are rejected.
pub fn resolve_output_path(output: &Path) -> Result<PathBuf, MergeError> {
    let Some(name) = output.file_name() else {
        return Err(unwritable(output, "it does not name a file"));
    };
    Ok(match output.parent() {
        Some(parent) if parent.as_os_str().is_empty() || parent == Path::new(".") => {
            Path::new(DEFAULT_OUTPUT_DIR).join(name)
        }
        _ => output.to_path_buf(),
    })
}

fn has_extension(path: &Path, extension: &str, case: CaseMode) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    match case {
        CaseMode::Insensitive => ext.eq_ignore_ascii_case(extension),
        CaseMode::Sensitive => ext == extension,
    }
}

/// Collect the regular files in `dir` carrying `extension`, as absolute paths
/// in natural order. Fails if one of them is `output`, which would be
/// overwritten by the merge.
pub fn discover_inputs(
    dir: &Path,
    extension: &str,
    case: CaseMode,
    output: Option<&Path>,
) -> Result<Vec<PathBuf>, MergeError> {
    if !dir.is_dir() {
        return Err(MergeError::InvalidInputPath(dir.to_path_buf()));
    }
    let extension = extension.trim_start_matches('.');
    let output = output.and_then(|p| fs::canonicalize(p).ok());

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || !has_extension(&path, extension, case) {
            continue;
        }
        let path = fs::canonicalize(&path)?;
        if output.as_deref() == Some(path.as_path()) {
            return Err(unwritable(&path, "it is one of the inputs"));
        }
        files.push(path);
    }

    if files.is_empty() {
        return Err(MergeError::NoInputFilesFound {
            dir: dir.to_path_buf(),
            extension: extension.to_string(),
        });
    }
    sort_naturally(&mut files, case);
    Ok(files)
}

/// Build the job for merging `input_dir` into `output`. Touches nothing on disk.
pub fn plan(input_dir: &Path, output: &Path, options: &MergeOptions) -> Result<MergeJob, MergeError> {
    let output = resolve_output_path(output)?;
    let files = discover_inputs(input_dir, &options.extension, options.case, Some(output.as_path()))?;
    Ok(MergeJob {
        input_dir: input_dir.to_path_buf(),
        files,
        output,
    })
}

fn unwritable(path: &Path, reason: impl ToString) -> MergeError {
    MergeError::OutputPathUnwritable {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Create the output's directory if needed and make sure a file can be written there.
pub fn prepare_output(output: &Path) -> Result<(), MergeError> {
    if output.is_dir() {
        return Err(unwritable(output, "it is a directory"));
    }
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| unwritable(output, e))?;
    if output.exists() {
        fs::OpenOptions::new()
            .write(true)
            .open(output)
            .map_err(|e| unwritable(output, e))?;
    } else {
        tempfile::NamedTempFile::new_in(parent).map_err(|e| unwritable(output, e))?;
    }
    Ok(())
}

/// Run a planned job through `concatenator` and check how it went.
pub fn execute(
    job: &MergeJob,
    concatenator: &dyn ExternalConcatenator,
    verbose: bool,
) -> Result<MergeReport, MergeError> {
    prepare_output(&job.output)?;
    log::debug!(
        "Concatenating {} files into {}",
        job.files.len(),
        job.output.display()
    );

    let outcome = concatenator.concatenate(&job.files, &job.output)?;
    if !outcome.success {
        return Err(MergeError::ExternalToolFailed {
            program: concatenator.program().to_string(),
            status: outcome.status,
            diagnostics: verbose.then_some(outcome.diagnostics),
        });
    }

    Ok(MergeReport {
        file_count: job.files.len(),
        output: display_path(&job.output),
    })
}
