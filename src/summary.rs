//! Sequencing summary support.
//!
//! A basecaller summary is a tab-delimited table with one line per read and
//! a precomputed mean quality per read type. Filtering against it replaces the
//! quality recomputed from the FASTQ with the basecaller's own value, joined
//! on the read identifier.

use crate::{
    config::{FilterConfig, ReadType},
    error::{FilterError, Result},
    record::{Crop, Record},
};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

const READ_ID_COLUMN: &str = "read_id";

impl ReadType {
    fn quality_column(&self) -> &'static str {
        match self {
            ReadType::OneD => "mean_qscore_template",
            ReadType::TwoD | ReadType::OneDSquare => "mean_qscore_2d",
        }
    }

    fn length_column(&self) -> &'static str {
        match self {
            ReadType::OneD => "sequence_length_template",
            ReadType::TwoD | ReadType::OneDSquare => "sequence_length_2d",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub read_id: String,
    pub quality: f64,
    pub read_type: ReadType,
}

/// Rows of a sequencing summary for one read type.
#[derive(Debug, Clone)]
pub struct SummaryTable {
    read_type: ReadType,
    rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn from_path<P: AsRef<Path>>(path: P, read_type: ReadType) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), %read_type, "loading summary");
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), read_type)
    }

    /// Reads a header line followed by data lines, taking only the columns
    /// of `read_type`. Reads reported with a length of 0 carry no basecall
    /// and are left out.
    pub fn from_reader<R: BufRead>(reader: R, read_type: ReadType) -> Result<Self> {
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(FilterError::MissingColumn {
                    column: READ_ID_COLUMN.to_string(),
                })
            }
        };
        let header: Vec<&str> = header.trim_end().split('\t').collect();
        let position = |name: &str| header.iter().position(|&column| column == name);
        let missing = |name: &str| FilterError::MissingColumn {
            column: name.to_string(),
        };

        let id_index = position(READ_ID_COLUMN).ok_or_else(|| missing(READ_ID_COLUMN))?;
        let quality_index = position(read_type.quality_column())
            .ok_or_else(|| missing(read_type.quality_column()))?;
        let length_index = position(read_type.length_column());

        let mut rows = Vec::new();
        for (offset, line) in lines.enumerate() {
            let line = line?;
            let line_number = offset + 2;
            let line = line.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            let field = |index: usize| {
                fields
                    .get(index)
                    .copied()
                    .ok_or_else(|| FilterError::InvalidSummaryLine {
                        line: line_number,
                        msg: format!("expected at least {} fields, found {}", index + 1, fields.len()),
                    })
            };

            if let Some(length_index) = length_index {
                if parse_number(field(length_index)?, line_number)? == 0.0 {
                    continue;
                }
            }
            rows.push(SummaryRow {
                read_id: field(id_index)?.to_string(),
                quality: parse_number(field(quality_index)?, line_number)?,
                read_type,
            });
        }

        debug!(rows = rows.len(), %read_type, "summary loaded");
        Ok(SummaryTable { read_type, rows })
    }

    pub fn read_type(&self) -> ReadType {
        self.read_type
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<SummaryRow> {
        self.rows
    }
}

fn parse_number(value: &str, line: usize) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| FilterError::InvalidSummaryLine {
            line,
            msg: format!("'{}' is not a number: {}", value, e),
        })
}

/// Read identifier to summary quality for one read type.
#[derive(Debug, Clone, Default)]
pub struct SummaryIndex {
    qualities: HashMap<Vec<u8>, f64>,
}

impl SummaryIndex {
    /// Indexes the rows of `read_type`. A read listed more than once keeps
    /// the quality of its last row.
    pub fn build<I>(rows: I, read_type: ReadType) -> Self
    where
        I: IntoIterator<Item = SummaryRow>,
    {
        let mut qualities = HashMap::new();
        let mut duplicates = 0usize;
        for row in rows.into_iter().filter(|row| row.read_type == read_type) {
            if qualities.insert(row.read_id.into_bytes(), row.quality).is_some() {
                duplicates += 1;
            }
        }
        if duplicates > 0 {
            warn!(duplicates, "summary lists some reads more than once, keeping the last entry");
        }
        debug!(reads = qualities.len(), %read_type, "summary index built");
        SummaryIndex { qualities }
    }

    pub fn get(&self, read_id: &[u8]) -> Option<f64> {
        self.qualities.get(read_id).copied()
    }

    pub fn len(&self) -> usize {
        self.qualities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qualities.is_empty()
    }
}

/// Quality and length filter driven by a summary index.
///
/// Unlike [`crate::filter::StreamFilter`] the length threshold is applied to
/// the uncropped read as given and GC bounds are not evaluated.
pub struct SummaryFilter {
    min_quality: f64,
    min_length: usize,
    crop: Crop,
    index: SummaryIndex,
}

impl SummaryFilter {
    pub fn new(config: &FilterConfig, index: SummaryIndex) -> Self {
        SummaryFilter {
            min_quality: config.min_quality(),
            min_length: config.min_length(),
            crop: config.crop(),
            index,
        }
    }

    /// Cropped view of `record` when it passes. A read that the summary does
    /// not know means the two inputs describe different runs, which is an
    /// error rather than a filtered read.
    pub fn evaluate<'a>(&self, record: &Record<'a>) -> Result<Option<Record<'a>>> {
        let quality = self
            .index
            .get(record.id())
            .ok_or_else(|| FilterError::MissingSummaryEntry {
                id: String::from_utf8_lossy(record.id()).into_owned(),
            })?;

        let passes = quality > self.min_quality && record.len() > self.min_length;
        Ok(passes.then(|| record.crop(self.crop)))
    }
}
