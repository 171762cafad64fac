use std::io::{self, Read};

use crate::error::{DatasetError, Result};
use crate::types::LabeledRecord;

/// Sequential reader over a dataset file, yielding records until end-of-stream.
pub struct DatasetReader<R: Read> {
    source: R,
    records_read: usize,
    done: bool,
}

impl<R: Read> DatasetReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            records_read: 0,
            done: false,
        }
    }

    pub fn records_read(&self) -> usize {
        self.records_read
    }

    fn read_record(&mut self) -> Result<Option<LabeledRecord>> {
        let mut length_bytes = [0u8; 4];
        let filled = read_up_to(&mut self.source, &mut length_bytes)?;
        if filled == 0 {
            return Ok(None);
        }
        if filled < length_bytes.len() {
            return Err(self.truncated("length"));
        }

        let length = u32::from_le_bytes(length_bytes) as usize;
        let mut image_bytes = Vec::new();
        (&mut self.source)
            .take(length as u64)
            .read_to_end(&mut image_bytes)?;
        if image_bytes.len() < length {
            return Err(self.truncated("image data"));
        }

        let mut label_bytes = [0u8; 4];
        if read_up_to(&mut self.source, &mut label_bytes)? < label_bytes.len() {
            return Err(self.truncated("label"));
        }

        Ok(Some(LabeledRecord::new(
            image_bytes,
            i32::from_le_bytes(label_bytes),
        )))
    }

    fn truncated(&self, field: &str) -> DatasetError {
        DatasetError::Input(format!(
            "truncated record {}: stream ended inside the {} field",
            self.records_read, field
        ))
    }
}

impl<R: Read> Iterator for DatasetReader<R> {
    type Item = Result<LabeledRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => {
                self.records_read += 1;
                Some(Ok(record))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

// Fill as much of `buf` as the stream allows; a short count means end-of-stream.
fn read_up_to<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
