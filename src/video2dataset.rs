use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

use video2dataset::{
    collect_frame_paths, read_annotations, write_dataset_file, Args, IntervalLabeler, Result,
};

fn run(args: &Args) -> Result<()> {
    let annotations = match &args.annotations {
        Some(path) => read_annotations(path)?,
        None => {
            info!("No annotations file given; every frame will be unlabeled");
            Vec::new()
        }
    };
    let labeler = IntervalLabeler::new(annotations, args.validation())?;

    let frame_paths = collect_frame_paths(&args.frames_dir, &args.extension)?;
    info!(
        "Found {} .{} frames in {}",
        frame_paths.len(),
        args.extension,
        args.frames_dir.display()
    );

    let stats = write_dataset_file(&frame_paths, args.frame_rate, &labeler, &args.output)?;
    stats.print_summary();
    Ok(())
}

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    info!("Starting the dataset build...");

    match run(&args) {
        Ok(()) => {
            info!("Dataset build completed successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to build dataset: {}", e);
            ExitCode::FAILURE
        }
    }
}
