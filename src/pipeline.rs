use log::debug;
use std::io::Write;

use crate::encoder::DatasetWriter;
use crate::error::{DatasetError, Result};
use crate::labeler::{frame_timestamp, IntervalLabeler};
use crate::types::ProcessingStats;

/// Label every frame in order and stream the records into `sink`.
///
/// `frames` is consumed lazily so only one image is held at a time. The first
/// failing frame read or write aborts the pass; whatever was already written
/// to `sink` stays there and must be discarded by the caller.
pub fn build_dataset<I, W>(
    frames: I,
    frame_rate: f64,
    labeler: &IntervalLabeler,
    sink: W,
) -> Result<ProcessingStats>
where
    I: IntoIterator<Item = Result<Vec<u8>>>,
    W: Write,
{
    validate_frame_rate(frame_rate)?;

    let mut writer = DatasetWriter::new(sink);
    let mut stats = ProcessingStats::new();

    for (index, frame) in frames.into_iter().enumerate() {
        let image_bytes = frame?;
        let timestamp = frame_timestamp(index, frame_rate);
        let label = labeler.label_for(timestamp);
        debug!(
            "Frame {} at {:.3}s: {} bytes, label {}",
            index,
            timestamp,
            image_bytes.len(),
            label
        );

        writer.write_record(&image_bytes, label)?;
        stats.record_frame(label);
    }

    stats.bytes_written = writer.bytes_written();
    debug!(
        "Encoded {} records against {} annotations",
        writer.records_written(),
        labeler.annotations().len()
    );
    writer.finish()?;
    Ok(stats)
}

pub fn validate_frame_rate(frame_rate: f64) -> Result<()> {
    if frame_rate.is_finite() && frame_rate > 0.0 {
        Ok(())
    } else {
        Err(DatasetError::Input(format!(
            "frame rate must be a positive number, got {}",
            frame_rate
        )))
    }
}
