mod app;
mod cli;
mod error;
mod ffmpeg;
mod job;
mod merger;
mod natural_sort;
mod util;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    app::init_logging(args.verbose);
    app::run(args)
}
