//! Video frames to labeled dataset converter
//!
//! This library labels an ordered sequence of extracted video frames from
//! time-ranged annotations and streams the (image, label) pairs into a single
//! binary dataset file for machine-learning training.

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod io;
pub mod labeler;
pub mod pipeline;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use config::{Args, InspectArgs};
pub use decoder::DatasetReader;
pub use encoder::{encode, DatasetWriter};
pub use error::{DatasetError, Result};
pub use io::{collect_frame_paths, inspect_dataset_file, read_annotations, write_dataset_file};
pub use labeler::{frame_timestamp, label_for, IntervalLabeler, Validation};
pub use pipeline::build_dataset;
pub use types::{Annotation, DatasetSummary, LabeledRecord, ProcessingStats, UNLABELED};
