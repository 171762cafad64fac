use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use crate::labeler::Validation;

/// Build a labeled binary dataset from extracted video frames and time-ranged annotations.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Directory containing the extracted frame images
    #[arg(short = 'd', long = "frames_dir")]
    pub frames_dir: PathBuf,

    /// JSON file with an array of {startTime, endTime, labelId} annotations
    #[arg(short = 'a', long = "annotations")]
    pub annotations: Option<PathBuf>,

    /// Path of the dataset file to write
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Frame rate the frames were extracted at, in frames per second
    #[arg(long = "frame_rate", default_value_t = 30.0, value_parser = validate_frame_rate)]
    pub frame_rate: f64,

    /// File extension of the frame images
    #[arg(long = "extension", default_value = "jpg")]
    pub extension: String,

    /// Reject annotations whose startTime is after their endTime
    #[arg(long = "strict")]
    pub strict: bool,
}

impl Args {
    pub fn validation(&self) -> Validation {
        if self.strict {
            Validation::Strict
        } else {
            Validation::Permissive
        }
    }
}

/// Decode a dataset file and summarize its records.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct InspectArgs {
    /// Dataset file produced by video2dataset
    #[arg(short = 'i', long = "dataset")]
    pub dataset: PathBuf,
}

// Validate that the frame rate is a positive, finite number
pub fn validate_frame_rate(s: &str) -> Result<f64, String> {
    match f64::from_str(s) {
        Ok(val) if val.is_finite() && val > 0.0 => Ok(val),
        _ => Err("FRAME_RATE must be a positive number".to_string()),
    }
}
