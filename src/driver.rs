use crate::{
    config::FilterConfig,
    error::Result,
    filter::{FilterStats, StreamFilter},
    reader::FastqReader,
    summary::{SummaryFilter, SummaryIndex},
    writer::FastqWriter,
};
use std::io::{BufRead, Write};
use tracing::{debug, trace};

/// Where the read quality comes from.
pub enum FilterMode {
    /// Recomputed from each read's quality string.
    Stream,
    /// Looked up in a sequencing summary.
    Summary(SummaryIndex),
}

enum Selected {
    Stream(StreamFilter),
    Summary(SummaryFilter),
}

/// One filtering run: a validated configuration and the filter it selects.
pub struct FilterRun {
    config: FilterConfig,
    filter: Selected,
}

impl FilterRun {
    pub fn new(config: FilterConfig, mode: FilterMode) -> Self {
        let filter = match mode {
            FilterMode::Stream => Selected::Stream(StreamFilter::new(&config)),
            FilterMode::Summary(index) => {
                debug!(reads = index.len(), "filtering with summary qualities");
                Selected::Summary(SummaryFilter::new(&config, index))
            }
        };
        FilterRun { config, filter }
    }

    /// Filters FASTQ from `input` to `output` one record at a time, keeping
    /// input order.
    ///
    /// Any error ends the run. Records written before the failing one are
    /// flushed to `output` before the error is returned.
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<FilterStats> {
        let mut reader = FastqReader::new(input);
        let mut writer = FastqWriter::new(output);
        let mut stats = FilterStats::new();

        debug!(config = ?self.config, "starting run");
        while let Some(record) = reader.read_record()? {
            let kept = match &self.filter {
                Selected::Stream(filter) => filter.evaluate(&record),
                Selected::Summary(filter) => filter.evaluate(&record)?,
            };

            match &kept {
                Some(kept) => writer.write_record(kept)?,
                None => trace!(id = %String::from_utf8_lossy(record.id()), "filtered out"),
            }
            stats.record(&record, kept.as_ref());
        }
        writer.flush()?;
        debug!(written = writer.written(), "output flushed");

        stats.log_summary();
        Ok(stats)
    }
}
