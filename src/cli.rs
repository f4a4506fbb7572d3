use clap::Parser;
use std::path::PathBuf;

/// Merge multiple M4A files into one using FFmpeg (stream copy, no re-encoding)
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    after_help = "Examples:\n  m4a-merger --input basemedia/ --output merged.m4a\n  m4a-merger -i ./audio -o result/all.m4a --verbose\n\nAn output given without a directory is saved to the 'merged/' folder."
)]
pub struct Args {
    /// Directory containing the files to merge
    #[arg(short = 'i', long)]
    pub input: Option<PathBuf>,

    /// Output file path (its directory is created if missing)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Show the files found, the FFmpeg command and FFmpeg's output on failure
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Extension of the files to collect. Defaults to m4a.
    #[arg(short = 'e', long)]
    pub extension: Option<String>,

    /// Match the extension and sort file names case-sensitively (default is case-insensitive)
    #[arg(long, conflicts_with = "ignore_case")]
    pub case_sensitive: bool,

    /// Match and sort case-insensitively, even if the job file asks otherwise
    #[arg(long)]
    pub ignore_case: bool,

    /// Show the merge plan without running FFmpeg or creating any directory
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Check FFmpeg installation and version, then exit.
    #[arg(short = 'c', long)]
    pub check_ffmpeg: bool,

    /// Path to a JSON job file (input, output, extension, case_sensitive). CLI arguments override values in the job file.
    #[arg(short = 't', long = "job", value_name = "FILE")]
    pub job: Option<PathBuf>,

    /// Write the resolved job to this file as JSON. If no file is provided, the output path with a .json extension is used.
    #[arg(short = 'w', long = "write-job-file", num_args = 0..=1, value_name = "FILE")]
    pub write_job_file: Option<Option<PathBuf>>,
}
