//! Frame timestamp to label lookup.
//!
//! Precedence is first-in-input-order: when annotations overlap, the one
//! supplied earliest wins. Annotations are never re-sorted.

use log::warn;

use crate::error::{DatasetError, Result};
use crate::types::{Annotation, UNLABELED};

/// How inverted or NaN intervals are treated when building a labeler.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Validation {
    /// Keep malformed intervals; they never match anything.
    #[default]
    Permissive,
    /// Reject the first malformed interval with an input error.
    Strict,
}

/// Label of the first annotation containing `timestamp`, or [`UNLABELED`].
pub fn label_for(timestamp: f64, annotations: &[Annotation]) -> i32 {
    annotations
        .iter()
        .find(|annotation| annotation.contains(timestamp))
        .map_or(UNLABELED, |annotation| annotation.label_id)
}

/// Timestamp in seconds of the frame at `index` for a constant frame rate.
pub fn frame_timestamp(index: usize, frame_rate: f64) -> f64 {
    index as f64 / frame_rate
}

#[derive(Debug, Clone, Default)]
pub struct IntervalLabeler {
    annotations: Vec<Annotation>,
}

impl IntervalLabeler {
    pub fn new(annotations: Vec<Annotation>, validation: Validation) -> Result<Self> {
        for (index, annotation) in annotations.iter().enumerate() {
            if annotation.is_well_formed() {
                continue;
            }
            match validation {
                Validation::Strict => {
                    return Err(DatasetError::Input(format!(
                        "annotation {} has startTime {} after endTime {}",
                        index, annotation.start_time, annotation.end_time
                    )));
                }
                Validation::Permissive => warn!(
                    "Annotation {} (label {}) spans {}..{} and will never match",
                    index, annotation.label_id, annotation.start_time, annotation.end_time
                ),
            }
        }
        Ok(Self { annotations })
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn label_for(&self, timestamp: f64) -> i32 {
        label_for(timestamp, &self.annotations)
    }
}
