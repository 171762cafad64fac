use glob::{glob, Pattern};
use log::{error, info, warn};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::decoder::DatasetReader;
use crate::error::{DatasetError, Result};
use crate::labeler::IntervalLabeler;
use crate::pipeline::build_dataset;
use crate::types::{Annotation, DatasetSummary, ProcessingStats};
use crate::utils::{create_progress_bar, ensure_parent_directory, infer_image_format, natural_cmp};

/// List the frame images in `frames_dir` in extraction order.
pub fn collect_frame_paths(frames_dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !frames_dir.is_dir() {
        return Err(DatasetError::Input(format!(
            "frames directory does not exist: {}",
            frames_dir.display()
        )));
    }

    let extension = extension.trim_start_matches('.');
    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(&frames_dir.to_string_lossy()),
        extension
    );
    let entries =
        glob(&pattern).map_err(|e| DatasetError::Input(format!("bad frame pattern: {}", e)))?;

    let mut frame_paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => frame_paths.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable entry: {}", e),
        }
    }

    frame_paths.sort_by(|a, b| natural_cmp(&file_name_of(a), &file_name_of(b)));
    Ok(frame_paths)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Parse a JSON array of annotations, keeping the order of the file.
pub fn read_annotations(path: &Path) -> Result<Vec<Annotation>> {
    let file = File::open(path).map_err(|e| {
        DatasetError::Input(format!(
            "failed to open annotations file ({}): {}",
            path.display(),
            e
        ))
    })?;
    let annotations: Vec<Annotation> = serde_json::from_reader(BufReader::new(file))?;
    info!(
        "Loaded {} annotations from {}",
        annotations.len(),
        path.display()
    );
    Ok(annotations)
}

/// Build the dataset file at `output` from the given frame files.
///
/// The output is rebuilt from scratch. If the pass fails the partial file is
/// removed so it cannot be mistaken for a valid dataset.
pub fn write_dataset_file(
    frame_paths: &[PathBuf],
    frame_rate: f64,
    labeler: &IntervalLabeler,
    output: &Path,
) -> Result<ProcessingStats> {
    ensure_parent_directory(output)?;
    let file = File::create(output)?;

    let pb = create_progress_bar(frame_paths.len() as u64, "Frames");
    let frames = frame_paths.iter().map(|path| {
        let bytes = fs::read(path).map_err(|e| {
            DatasetError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to read frame {}: {}", path.display(), e),
            ))
        });
        pb.inc(1);
        bytes
    });

    let result = build_dataset(frames, frame_rate, labeler, BufWriter::new(file));
    match result {
        Ok(stats) => {
            pb.finish_with_message("Frame processing complete");
            info!("Wrote dataset to {}", output.display());
            Ok(stats)
        }
        Err(e) => {
            pb.abandon();
            error!("Dataset build failed, removing {}", output.display());
            if let Err(remove_err) = fs::remove_file(output) {
                warn!(
                    "Failed to remove partial dataset {}: {}",
                    output.display(),
                    remove_err
                );
            }
            Err(e)
        }
    }
}

/// Decode a dataset file end to end and tally its labels and image formats.
pub fn inspect_dataset_file(path: &Path) -> Result<DatasetSummary> {
    let file = File::open(path)?;
    let mut summary = DatasetSummary::default();
    for record in DatasetReader::new(BufReader::new(file)) {
        let record = record?;
        summary.add_record(&record, infer_image_format(&record.image_bytes));
    }
    Ok(summary)
}
