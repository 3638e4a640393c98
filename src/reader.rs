use crate::{
    error::{FilterError, Result},
    record::{OwnedRecord, Record, DEFAULT_SEPARATOR},
};
use std::io::BufRead;

const LINE_CAPACITY: usize = 64 * 1024;

/// Sequential reader for four-line FASTQ.
///
/// Line buffers are reused between records, so [`FastqReader::read_record`]
/// hands out views that borrow the reader until the next call.
pub struct FastqReader<R: BufRead> {
    reader: R,
    header: Vec<u8>,
    seq: Vec<u8>,
    sep: Vec<u8>,
    qual: Vec<u8>,
    line: usize,
}

impl<R: BufRead> FastqReader<R> {
    pub fn new(reader: R) -> Self {
        FastqReader {
            reader,
            header: Vec::with_capacity(256),
            seq: Vec::with_capacity(LINE_CAPACITY),
            sep: Vec::with_capacity(256),
            qual: Vec::with_capacity(LINE_CAPACITY),
            line: 0,
        }
    }

    /// Number of lines consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn read_record(&mut self) -> Result<Option<Record<'_>>> {
        loop {
            if !read_line(&mut self.reader, &mut self.header, &mut self.line)? {
                return Ok(None);
            }
            if !self.header.is_empty() {
                break;
            }
        }
        let header_line = self.line;

        if self.header[0] != b'@' {
            return Err(FilterError::InvalidHeader { line: header_line });
        }

        if !read_line(&mut self.reader, &mut self.seq, &mut self.line)? {
            return Err(FilterError::UnexpectedEof { line: self.line + 1 });
        }

        if !read_line(&mut self.reader, &mut self.sep, &mut self.line)? {
            return Err(FilterError::UnexpectedEof { line: self.line + 1 });
        }
        if self.sep.first() != Some(&b'+') {
            return Err(FilterError::InvalidSeparator { line: self.line });
        }
        if self.sep.len() > 1 && self.sep[1..] != self.header[1..] {
            return Err(FilterError::InvalidFormat {
                line: self.line,
                msg: "separator title does not match the record header".to_string(),
            });
        }

        if !read_line(&mut self.reader, &mut self.qual, &mut self.line)? {
            return Err(FilterError::UnexpectedEof { line: self.line + 1 });
        }
        if self.seq.len() != self.qual.len() {
            return Err(FilterError::LengthMismatch {
                line: self.line,
                seq_len: self.seq.len(),
                qual_len: self.qual.len(),
            });
        }
        if let Some(&qual) = self.qual.iter().find(|q| !(b'!'..=b'~').contains(*q)) {
            return Err(FilterError::InvalidQuality {
                line: self.line,
                qual: qual as char,
            });
        }

        let (id, desc, separator) = parse_header(&self.header[1..]);
        Ok(Some(
            Record::new(id, desc, &self.seq, &self.qual).with_separator(separator),
        ))
    }

    /// Owning iterator over the remaining records.
    pub fn records(self) -> Records<R> {
        Records { reader: self }
    }
}

/// Reads one line into `buf` without its terminator or trailing whitespace.
/// Returns `false` at end of input.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>, line: &mut usize) -> Result<bool> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(false);
    }
    *line += 1;
    let end = buf
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    buf.truncate(end);
    Ok(true)
}

/// Splits a title at the first space or tab into the identifier, the
/// optional description and the byte that separated them.
#[inline]
fn parse_header(title: &[u8]) -> (&[u8], Option<&[u8]>, u8) {
    match memchr::memchr2(b' ', b'\t', title) {
        Some(pos) => (&title[..pos], Some(&title[pos + 1..]), title[pos]),
        None => (title, None, DEFAULT_SEPARATOR),
    }
}

pub struct Records<R: BufRead> {
    reader: FastqReader<R>,
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<OwnedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader
            .read_record()
            .map(|opt| opt.map(|r| OwnedRecord::from_record(&r)))
            .transpose()
    }
}
