use crate::{error::Result, record::Record};
use std::io::{BufWriter, Write};

/// Buffered four-line FASTQ output. Buffered bytes are flushed on drop, but
/// only [`FastqWriter::flush`] reports a failed write.
pub struct FastqWriter<W: Write> {
    writer: BufWriter<W>,
    written: usize,
}

impl<W: Write> FastqWriter<W> {
    pub fn new(writer: W) -> Self {
        FastqWriter {
            writer: BufWriter::new(writer),
            written: 0,
        }
    }

    /// Writes `record` with a bare `+` separator line.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        self.write_title(record)?;
        self.writer.write_all(record.seq())?;
        self.writer.write_all(b"\n+\n")?;
        self.writer.write_all(record.qual())?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn write_title(&mut self, record: &Record) -> Result<()> {
        self.writer.write_all(b"@")?;
        self.writer.write_all(record.id())?;
        if let Some(desc) = record.desc() {
            self.writer.write_all(&[record.separator()])?;
            self.writer.write_all(desc)?;
        }
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Records written so far, flushed or not.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Drop for FastqWriter<W> {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
