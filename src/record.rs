use std::ops::Range;

/// Offset of Sanger/Illumina 1.8+ quality strings.
pub const PHRED_OFFSET: u8 = 33;

/// Byte between identifier and description when a title does not say.
pub const DEFAULT_SEPARATOR: u8 = b' ';

/// Bases removed from both ends of a read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crop {
    pub head: usize,
    pub tail: usize,
}

impl Crop {
    pub fn new(head: Option<usize>, tail: Option<usize>) -> Self {
        Crop {
            head: head.unwrap_or(0),
            tail: tail.unwrap_or(0),
        }
    }

    #[inline]
    pub fn is_noop(&self) -> bool {
        self.head == 0 && self.tail == 0
    }

    /// Range kept out of a read of length `len`. The end is counted back from
    /// `len` and never moves before the start, so over-cropping yields an
    /// empty range rather than a reversed one.
    #[inline]
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = self.head.min(len);
        let end = (len - self.tail.min(len)).max(start);
        start..end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    pub id: &'a [u8],
    pub desc: Option<&'a [u8]>,
    pub seq: &'a [u8],
    pub qual: &'a [u8],
    separator: u8,
}

impl<'a> Record<'a> {
    #[inline]
    pub fn new(id: &'a [u8], desc: Option<&'a [u8]>, seq: &'a [u8], qual: &'a [u8]) -> Self {
        Record {
            id,
            desc,
            seq,
            qual,
            separator: DEFAULT_SEPARATOR,
        }
    }

    /// Sets the byte that stood between identifier and description in the
    /// title, so the title is written back as it was read.
    #[inline]
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    #[inline]
    pub fn id(&self) -> &'a [u8] {
        self.id
    }

    #[inline]
    pub fn desc(&self) -> Option<&'a [u8]> {
        self.desc
    }

    #[inline]
    pub fn seq(&self) -> &'a [u8] {
        self.seq
    }

    #[inline]
    pub fn separator(&self) -> u8 {
        self.separator
    }

    #[inline]
    pub fn qual(&self) -> &'a [u8] {
        self.qual
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Error-probability averaged quality of the whole read, `None` for an
    /// empty read. See [`crate::quality::average_quality`].
    pub fn average_quality(&self) -> Option<f64> {
        crate::quality::average_quality_iter(
            self.qual.iter().map(|&q| q.saturating_sub(PHRED_OFFSET)),
        )
    }

    /// Fraction of G and C bases, case-insensitive. An empty read has no GC.
    pub fn gc_fraction(&self) -> f64 {
        if self.seq.is_empty() {
            return 0.0;
        }
        let gc = self
            .seq
            .iter()
            .filter(|&&b| matches!(b, b'G' | b'C' | b'g' | b'c'))
            .count();
        gc as f64 / self.seq.len() as f64
    }

    /// View with the cropped bases removed from sequence and quality alike.
    #[inline]
    pub fn crop(&self, crop: Crop) -> Record<'a> {
        let range = crop.range(self.seq.len());
        Record {
            id: self.id,
            desc: self.desc,
            seq: &self.seq[range.clone()],
            qual: &self.qual[range],
            separator: self.separator,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedRecord {
    pub id: Vec<u8>,
    pub desc: Option<Vec<u8>>,
    pub seq: Vec<u8>,
    pub qual: Vec<u8>,
    pub separator: u8,
}

impl OwnedRecord {
    pub fn from_record(record: &Record) -> Self {
        OwnedRecord {
            id: record.id.to_vec(),
            desc: record.desc.map(|d| d.to_vec()),
            seq: record.seq.to_vec(),
            qual: record.qual.to_vec(),
            separator: record.separator,
        }
    }

    pub fn as_record(&self) -> Record<'_> {
        Record {
            id: &self.id,
            desc: self.desc.as_deref(),
            seq: &self.seq,
            qual: &self.qual,
            separator: self.separator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_both_ends() {
        let record = Record::new(b"r1", None, b"ACGTACGTAA", b"ABCDEFGHIJ");
        let cropped = record.crop(Crop::new(Some(2), Some(2)));
        assert_eq!(cropped.seq, b"GTACGT");
        assert_eq!(cropped.qual, b"CDEFGH");
        assert_eq!(record.seq, b"ACGTACGTAA");
    }

    #[test]
    fn test_crop_clamps_to_empty() {
        assert_eq!(Crop::new(Some(8), Some(8)).range(10), 8..8);
        assert_eq!(Crop::new(Some(12), None).range(10), 10..10);
        assert_eq!(Crop::new(None, Some(15)).range(10), 0..0);
        assert_eq!(Crop::default().range(10), 0..10);
    }

    #[test]
    fn test_average_quality_decodes_phred33() {
        // '5' is Q20 for every base
        let record = Record::new(b"r1", None, b"ACG", b"555");
        assert!((record.average_quality().unwrap() - 20.0).abs() < 1e-9);
        assert_eq!(Record::new(b"r1", None, b"", b"").average_quality(), None);
    }

    #[test]
    fn test_gc_fraction_is_case_insensitive() {
        let record = Record::new(b"r1", None, b"acGTccgA", b"IIIIIIII");
        assert!((record.gc_fraction() - 0.625).abs() < 1e-12);
    }

    #[test]
    fn test_separator_survives_crop_and_ownership() {
        let record = Record::new(b"r1", Some(b"ch=7"), b"ACGT", b"IIII").with_separator(b'\t');
        let cropped = record.crop(Crop::new(Some(1), None));
        assert_eq!(cropped.separator(), b'\t');
        let owned = OwnedRecord::from_record(&cropped);
        assert_eq!(owned.as_record(), cropped);
        assert_eq!(Record::new(b"r2", None, b"A", b"I").separator(), DEFAULT_SEPARATOR);
    }
}
