use std::io::stdout;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

mod analyze;
mod cli;
mod error;
mod extract;
mod input;

use crate::cli::Cli;
use crate::cli::Config;
use crate::cli::Job;
use crate::error::AppError;

fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::load(cli.config.as_deref())?;
    debug!("CONFIG: {:?}", config);

    let mut out = stdout().lock();

    match cli.resolve(config) {
        Job::Extract {
            input,
            output_dir,
            max_meta_size,
        } => {
            let summary = extract::run(&input, &output_dir, max_meta_size, &mut out)?;
            info!(
                "{} chunks, {} documents extracted ({} bytes), {} skipped, trailing bytes at {:?}",
                summary.chunks, summary.extracted, summary.bytes, summary.skipped, summary.trailing
            );
        }
        Job::Analyze {
            input,
            max_meta_size,
        } => {
            let summary = analyze::run(&input, max_meta_size, &mut out)?;
            info!(
                "{} chunks, trailing bytes at {:?}",
                summary.chunks, summary.trailing
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Parse the cli
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
