use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

use video2dataset::{config::InspectArgs, inspect_dataset_file};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = InspectArgs::parse();

    info!("Reading dataset {}", args.dataset.display());

    match inspect_dataset_file(&args.dataset) {
        Ok(summary) => {
            summary.print_summary();
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to read dataset: {}", e);
            ExitCode::FAILURE
        }
    }
}
