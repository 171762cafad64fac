use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Label written for frames that no annotation covers.
pub const UNLABELED: i32 = -1;

// A user-declared time range (in seconds) during which a label applies
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub start_time: f64,
    pub end_time: f64,
    #[serde(deserialize_with = "deserialize_label_id")]
    pub label_id: i32,
}

impl Annotation {
    pub fn new(start_time: f64, end_time: f64, label_id: i32) -> Self {
        Self {
            start_time,
            end_time,
            label_id,
        }
    }

    /// Both bounds inclusive. An inverted interval never contains anything.
    pub fn contains(&self, timestamp: f64) -> bool {
        self.start_time <= timestamp && timestamp <= self.end_time
    }

    pub fn is_well_formed(&self) -> bool {
        self.start_time <= self.end_time
    }
}

// One (image bytes, label) pair as stored in the dataset file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledRecord {
    pub image_bytes: Vec<u8>,
    pub label: i32,
}

impl LabeledRecord {
    pub fn new(image_bytes: Vec<u8>, label: i32) -> Self {
        Self { image_bytes, label }
    }
}

/// Accepts `labelId` as a JSON integer, an integral float, or a string holding an integer.
///
/// Fractional floats such as `2.7` are rejected rather than truncated to `2`.
fn deserialize_label_id<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    struct LabelIdVisitor;

    impl<'de> Visitor<'de> for LabelIdVisitor {
        type Value = i32;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a 32-bit integer label id or a string containing one")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i32, E> {
            i32::try_from(v).map_err(|_| E::custom(format!("label id {} out of range", v)))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i32, E> {
            i32::try_from(v).map_err(|_| E::custom(format!("label id {} out of range", v)))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i32, E> {
            if v.fract() == 0.0 && v >= i32::MIN as f64 && v <= i32::MAX as f64 {
                Ok(v as i32)
            } else {
                Err(E::custom(format!("label id {} is not a 32-bit integer", v)))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i32, E> {
            v.trim()
                .parse::<i32>()
                .map_err(|_| E::custom(format!("label id {:?} is not an integer", v)))
        }
    }

    deserializer.deserialize_any(LabelIdVisitor)
}

// Struct to hold processing statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    pub frames_processed: usize,
    pub labeled_frames: usize,
    pub unlabeled_frames: usize,
    pub bytes_written: u64,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self, label: i32) {
        self.frames_processed += 1;
        if label == UNLABELED {
            self.unlabeled_frames += 1;
        } else {
            self.labeled_frames += 1;
        }
    }

    pub fn print_summary(&self) {
        log::info!("=== Processing Summary ===");
        log::info!("Frames processed: {}", self.frames_processed);
        log::info!("Labeled frames: {}", self.labeled_frames);
        log::info!("Unlabeled frames: {}", self.unlabeled_frames);
        log::info!("Bytes written: {}", self.bytes_written);

        if self.frames_processed > 0 && self.labeled_frames == 0 {
            log::warn!("No frame fell inside any annotation; every record is unlabeled");
        }
    }
}

// Contents of a decoded dataset file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    pub records: usize,
    pub image_bytes: u64,
    pub label_counts: BTreeMap<i32, usize>,
    pub format_counts: BTreeMap<String, usize>,
}

impl DatasetSummary {
    pub fn add_record(&mut self, record: &LabeledRecord, format: Option<&str>) {
        self.records += 1;
        self.image_bytes += record.image_bytes.len() as u64;
        *self.label_counts.entry(record.label).or_insert(0) += 1;
        *self
            .format_counts
            .entry(format.unwrap_or("unknown").to_string())
            .or_insert(0) += 1;
    }

    pub fn print_summary(&self) {
        log::info!("=== Dataset Summary ===");
        log::info!("Records: {}", self.records);
        log::info!("Image bytes: {}", self.image_bytes);
        for (label, count) in &self.label_counts {
            if *label == UNLABELED {
                log::info!("    unlabeled: {}", count);
            } else {
                log::info!("    label {}: {}", label, count);
            }
        }
        for (format, count) in &self.format_counts {
            log::info!("    {} images: {}", format, count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_annotation() {
        let json = r#"{"startTime": 0.5, "endTime": 2.0, "labelId": 3, "id": 0}"#;
        let annotation: Annotation = serde_json::from_str(json).unwrap();
        assert_eq!(annotation, Annotation::new(0.5, 2.0, 3));
    }

    #[test]
    fn parses_string_label_id() {
        let json = r#"{"startTime": 0, "endTime": 1, "labelId": " 12 "}"#;
        let annotation: Annotation = serde_json::from_str(json).unwrap();
        assert_eq!(annotation.label_id, 12);
    }

    #[test]
    fn rejects_non_numeric_fields() {
        assert!(serde_json::from_str::<Annotation>(
            r#"{"startTime": "soon", "endTime": 1, "labelId": 1}"#
        )
        .is_err());
        assert!(serde_json::from_str::<Annotation>(
            r#"{"startTime": 0, "endTime": 1, "labelId": "cat"}"#
        )
        .is_err());
        assert!(serde_json::from_str::<Annotation>(
            r#"{"startTime": 0, "endTime": 1, "labelId": 4294967296}"#
        )
        .is_err());
    }

    #[test]
    fn integral_float_label_id_is_accepted_but_fraction_is_not() {
        let whole = r#"{"startTime": 0, "endTime": 1, "labelId": 2.0}"#;
        assert_eq!(serde_json::from_str::<Annotation>(whole).unwrap().label_id, 2);
        let fractional = r#"{"startTime": 0, "endTime": 1, "labelId": 2.7}"#;
        assert!(serde_json::from_str::<Annotation>(fractional).is_err());
    }

    #[test]
    fn contains_is_inclusive_and_inverted_is_inert() {
        let annotation = Annotation::new(1.0, 2.0, 0);
        assert!(annotation.contains(1.0));
        assert!(annotation.contains(2.0));
        assert!(!annotation.contains(2.0001));

        let inverted = Annotation::new(3.0, 1.0, 0);
        assert!(!inverted.is_well_formed());
        assert!(!inverted.contains(2.0));
        assert!(!inverted.contains(3.0));
    }

    #[test]
    fn stats_split_labeled_and_unlabeled() {
        let mut stats = ProcessingStats::new();
        stats.record_frame(4);
        stats.record_frame(UNLABELED);
        stats.record_frame(0);
        assert_eq!(stats.frames_processed, 3);
        assert_eq!(stats.labeled_frames, 2);
        assert_eq!(stats.unlabeled_frames, 1);
    }
}
