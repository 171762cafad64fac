//! Streaming writer for the dataset file format.
//!
//! Each record is `[u32 LE length][length bytes of image][i32 LE label]`.
//! There is no header, footer or record count.

use std::io::Write;

use crate::error::{DatasetError, Result};
use crate::types::LabeledRecord;

pub struct DatasetWriter<W: Write> {
    sink: W,
    records_written: usize,
    bytes_written: u64,
}

impl<W: Write> DatasetWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            records_written: 0,
            bytes_written: 0,
        }
    }

    /// Append one record. Nothing already written is undone on failure.
    pub fn write_record(&mut self, image_bytes: &[u8], label: i32) -> Result<()> {
        let length = length_field(image_bytes.len())?;

        self.sink.write_all(&length.to_le_bytes())?;
        self.sink.write_all(image_bytes)?;
        self.sink.write_all(&label.to_le_bytes())?;

        self.records_written += 1;
        self.bytes_written += 8 + u64::from(length);
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush the sink and hand it back.
    pub fn finish(mut self) -> Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

// Image lengths must fit the u32 length prefix.
fn length_field(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        DatasetError::Encoding(format!(
            "image of {} bytes exceeds the 32-bit length field",
            len
        ))
    })
}

/// Encode every record in order into `sink`, returning the number of bytes written.
pub fn encode<I, W>(records: I, sink: W) -> Result<u64>
where
    I: IntoIterator<Item = LabeledRecord>,
    W: Write,
{
    let mut writer = DatasetWriter::new(sink);
    for record in records {
        writer.write_record(&record.image_bytes, record.label)?;
    }
    let bytes = writer.bytes_written();
    writer.finish()?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn writes_little_endian_fields() {
        let mut buffer = Vec::new();
        let mut writer = DatasetWriter::new(&mut buffer);
        writer.write_record(&[0xAA, 0xBB, 0xCC], -1).unwrap();
        writer.write_record(&[], 258).unwrap();
        assert_eq!(writer.records_written(), 2);
        assert_eq!(writer.bytes_written(), 19);
        writer.finish().unwrap();

        assert_eq!(
            buffer,
            vec![
                3, 0, 0, 0, 0xAA, 0xBB, 0xCC, 0xFF, 0xFF, 0xFF, 0xFF, //
                0, 0, 0, 0, 2, 1, 0, 0,
            ]
        );
    }

    #[test]
    fn empty_sequence_writes_nothing() {
        let mut buffer = Vec::new();
        let bytes = encode(Vec::<LabeledRecord>::new(), &mut buffer).unwrap();
        assert_eq!(bytes, 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn encoding_is_deterministic() {
        let records = vec![
            LabeledRecord::new(b"first".to_vec(), 7),
            LabeledRecord::new(b"second".to_vec(), -1),
        ];
        let mut a = Vec::new();
        let mut b = Vec::new();
        encode(records.clone(), &mut a).unwrap();
        encode(records, &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn oversized_length_is_an_encoding_error() {
        assert_eq!(length_field(u32::MAX as usize).unwrap(), u32::MAX);
        let err = length_field(u32::MAX as usize + 1).unwrap_err();
        assert!(matches!(err, DatasetError::Encoding(_)));
    }

    struct FullSink;

    impl Write for FullSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_failure_is_an_io_error() {
        let mut writer = DatasetWriter::new(FullSink);
        let err = writer.write_record(b"frame", 0).unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
        assert_eq!(writer.records_written(), 0);
    }
}
