use crate::cli::Args;
use crate::error::MergeError;
use crate::ffmpeg::{FFMPEG, FfmpegConcatenator, check_ffmpeg_installation};
use crate::job::{JobFile, default_job_file_path};
use crate::merger::{self, DEFAULT_EXTENSION, MergeJob, MergeOptions};
use crate::natural_sort::CaseMode;
use crate::util::file_name_lossy;
use anyhow::{Result, bail};
use comfy_table::{Table, presets::UTF8_FULL};
use std::path::PathBuf;

/// Input, output and options after merging CLI arguments over the job file.
#[derive(Debug)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub options: MergeOptions,
}

pub fn init_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_env("RUST_LOG")
        .format_timestamp(None)
        .try_init()
        .ok();
}

pub fn run(args: Args) -> Result<()> {
    if args.check_ffmpeg {
        return handle_ffmpeg_check();
    }

    let job_file = load_job_from_args(&args)?;
    let settings = resolve_settings(&args, job_file)?;
    let verbose = settings.options.verbose;

    println!(
        "ℹ️ Collecting .{} files from {}",
        settings.options.extension,
        settings.input.display()
    );
    let job = merger::plan(&settings.input, &settings.output, &settings.options)?;

    if verbose || args.dry_run {
        print_plan(&job, &settings.options);
    }

    if let Some(write_job_file) = &args.write_job_file {
        let out_path = write_job_file
            .clone()
            .unwrap_or_else(|| default_job_file_path(&job.output));
        let resolved = JobFile {
            input: Some(settings.input.clone()),
            output: Some(job.output.clone()),
            extension: Some(settings.options.extension.clone()),
            case_sensitive: Some(settings.options.case == CaseMode::Sensitive),
        };
        resolved.save(&out_path)?;
        println!("✅ Wrote job to {}", out_path.display());
    }

    if args.dry_run {
        println!("\nDry run: FFmpeg was not invoked.");
        return Ok(());
    }

    println!("\n▶️ Merging {} files...", job.files.len());
    println!("ℹ️ Output: {}", job.output.display());

    let report = match merger::execute(&job, &FfmpegConcatenator::default(), verbose) {
        Ok(report) => report,
        Err(e @ MergeError::ExternalToolMissing(_)) => {
            println!("❌ FFmpeg is not installed or not in PATH");
            println!("   Please install FFmpeg: https://ffmpeg.org/download.html");
            return Err(e.into());
        }
        Err(e @ MergeError::ExternalToolFailed { .. }) if !verbose => {
            println!("❌ Merge failed. Re-run with --verbose to see FFmpeg's output.");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "✅ Merged {} files into {}",
        report.file_count,
        report.output.display()
    );
    Ok(())
}

/// Layer CLI arguments over the job file.
pub fn resolve_settings(args: &Args, job: Option<JobFile>) -> Result<Settings> {
    let job = job.unwrap_or_default();
    let Some(input) = args.input.clone().or(job.input) else {
        bail!("--input is required");
    };
    let Some(output) = args.output.clone().or(job.output) else {
        bail!("--output is required");
    };
    let extension = args
        .extension
        .clone()
        .or(job.extension)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
        .trim_start_matches('.')
        .to_string();
    if extension.is_empty() {
        bail!("--extension must not be empty");
    }
    let case_sensitive = if args.case_sensitive {
        true
    } else if args.ignore_case {
        false
    } else {
        job.case_sensitive.unwrap_or(false)
    };

    Ok(Settings {
        input,
        output,
        options: MergeOptions {
            extension,
            case: CaseMode::from_case_sensitive(case_sensitive),
            verbose: args.verbose,
        },
    })
}

fn print_plan(job: &MergeJob, options: &MergeOptions) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["#", "File"]);
    for (i, file) in job.files.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), file_name_lossy(file)]);
    }
    println!("\n▶️ Merge Order:");
    println!("{table}");

    let case = match options.case {
        CaseMode::Insensitive => "insensitive",
        CaseMode::Sensitive => "sensitive",
    };
    let mut info_table = Table::new();
    info_table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Parameter", "Value"]);
    info_table
        .add_row(vec![
            "Input Directory".to_string(),
            job.input_dir.display().to_string(),
        ])
        .add_row(vec![
            "Output File".to_string(),
            job.output.display().to_string(),
        ])
        .add_row(vec!["Extension".to_string(), format!(".{}", options.extension)])
        .add_row(vec!["Case".to_string(), case.to_string()])
        .add_row(vec!["Files".to_string(), job.files.len().to_string()]);
    println!("\n▶️ Job Details:");
    println!("{info_table}");
}

fn handle_ffmpeg_check() -> Result<()> {
    println!("🔍 Checking FFmpeg installation...\n");

    match check_ffmpeg_installation(FFMPEG) {
        Ok(result) => match result.version {
            Some(v) => {
                println!("✅ FFmpeg found:");
                println!("   Version: {}.{}.{}", v.major, v.minor, v.patch);
            }
            None => {
                println!("⚠️  FFmpeg found, but its version could not be parsed:");
                println!("   {}", result.first_line);
            }
        },
        Err(e @ MergeError::ExternalToolMissing(_)) => {
            println!("❌ FFmpeg not found in PATH");
            println!("   Please install FFmpeg: https://ffmpeg.org/download.html");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    }

    println!("\n🎉 FFmpeg check complete!");
    Ok(())
}

fn load_job_from_args(args: &Args) -> Result<Option<JobFile>> {
    match &args.job {
        Some(path) => Ok(Some(JobFile::load(path)?)),
        None => Ok(None),
    }
}
