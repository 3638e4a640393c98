use crate::{
    config::FilterConfig,
    record::{Crop, Record},
};
use tracing::{debug, info};

/// Length, quality and GC filter computed from the reads themselves.
pub struct StreamFilter {
    min_quality: f64,
    /// `min_length` raised by the crop, so the length left after cropping is
    /// what the threshold bounds.
    min_length: usize,
    gc_bounds: Option<(f64, f64)>,
    crop: Crop,
}

impl StreamFilter {
    pub fn new(config: &FilterConfig) -> Self {
        let crop = config.crop();
        let min_length = config
            .min_length()
            .saturating_add(crop.head)
            .saturating_add(crop.tail);
        let gc_bounds = config
            .gc_constrained()
            .then(|| (config.min_gc(), config.max_gc()));
        debug!(min_length, ?gc_bounds, ?crop, "stream filter ready");

        StreamFilter {
            min_quality: config.min_quality(),
            min_length,
            gc_bounds,
            crop,
        }
    }

    /// Length threshold the untrimmed read has to exceed.
    pub fn effective_min_length(&self) -> usize {
        self.min_length
    }

    pub fn passes(&self, record: &Record) -> bool {
        if let Some((min_gc, max_gc)) = self.gc_bounds {
            let gc = record.gc_fraction();
            if gc < min_gc || gc > max_gc {
                return false;
            }
        }

        if record.len() <= self.min_length {
            return false;
        }

        match record.average_quality() {
            Some(quality) => quality > self.min_quality,
            None => false,
        }
    }

    /// Cropped view of `record` when it passes, `None` when it is filtered out.
    pub fn evaluate<'a>(&self, record: &Record<'a>) -> Option<Record<'a>> {
        self.passes(record).then(|| record.crop(self.crop))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub total_reads: usize,
    pub passed_reads: usize,
    pub total_bases_removed: usize,
}

impl FilterStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, original: &Record, kept: Option<&Record>) {
        self.total_reads += 1;
        if let Some(kept) = kept {
            self.passed_reads += 1;
            self.total_bases_removed += original.len() - kept.len();
        }
    }

    pub fn filtered_reads(&self) -> usize {
        self.total_reads - self.passed_reads
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total_reads == 0 {
            return 0.0;
        }
        self.passed_reads as f64 / self.total_reads as f64 * 100.0
    }

    pub fn log_summary(&self) {
        info!(
            total_reads = self.total_reads,
            passed_reads = self.passed_reads,
            filtered_reads = self.filtered_reads(),
            pass_rate = format_args!("{:.2}%", self.pass_rate()),
            bases_cropped = self.total_bases_removed,
            "filtering finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> crate::config::FilterConfigBuilder {
        FilterConfig::builder()
    }

    #[test]
    fn test_crop_raises_length_threshold() {
        let filter = StreamFilter::new(
            &config()
                .min_length(5)
                .headcrop(Some(2))
                .tailcrop(Some(2))
                .build()
                .unwrap(),
        );
        assert_eq!(filter.effective_min_length(), 9);

        let long = Record::new(b"r1", None, b"ACGTACGTAA", b"??????????");
        let kept = filter.evaluate(&long).unwrap();
        assert_eq!(kept.seq, b"GTACGT");
        assert_eq!(kept.qual, b"??????");

        // 9 bases leave 5 after cropping, which is not more than 5
        let short = Record::new(b"r2", None, b"ACGTACGTA", b"?????????");
        assert!(filter.evaluate(&short).is_none());
    }

    #[test]
    fn test_quality_threshold_is_strict() {
        let filter = StreamFilter::new(&config().build().unwrap());
        // '!' is Q0, which averages to exactly 0
        let at_threshold = Record::new(b"r1", None, b"ACGT", b"!!!!");
        assert!(!filter.passes(&at_threshold));
        let above = Record::new(b"r1", None, b"ACGT", b"!!!\"");
        assert!(filter.passes(&above));
    }

    #[test]
    fn test_length_threshold_is_strict() {
        let filter = StreamFilter::new(&config().min_length(4).build().unwrap());
        assert!(!filter.passes(&Record::new(b"r1", None, b"ACGT", b"IIII")));
        assert!(filter.passes(&Record::new(b"r1", None, b"ACGTA", b"IIIII")));
    }

    #[test]
    fn test_gc_bounds_are_inclusive() {
        let filter = StreamFilter::new(&config().min_gc(0.5).max_gc(0.5).build().unwrap());
        assert!(filter.passes(&Record::new(b"r1", None, b"AAAACCCC", b"IIIIIIII")));
        assert!(!filter.passes(&Record::new(b"r2", None, b"AAAAACCC", b"IIIIIIII")));
    }

    #[test]
    fn test_gc_uses_untrimmed_sequence() {
        let filter = StreamFilter::new(
            &config()
                .max_gc(0.5)
                .headcrop(Some(4))
                .build()
                .unwrap(),
        );
        let record = Record::new(b"r1", None, b"AAAAAACCCCCC", b"IIIIIIIIIIII");
        let kept = filter.evaluate(&record).unwrap();
        assert_eq!(kept.seq, b"AACCCCCC");
    }

    #[test]
    fn test_empty_read_never_passes() {
        let filter = StreamFilter::new(&config().min_length(0).build().unwrap());
        assert!(filter.evaluate(&Record::new(b"r1", None, b"", b"")).is_none());
    }

    #[test]
    fn test_stats() {
        let mut stats = FilterStats::new();
        let original = Record::new(b"r1", None, b"ACGTACGT", b"IIIIIIII");
        let kept = original.crop(Crop::new(Some(1), Some(2)));
        stats.record(&original, Some(&kept));
        stats.record(&original, None);
        assert_eq!(stats.total_reads, 2);
        assert_eq!(stats.passed_reads, 1);
        assert_eq!(stats.filtered_reads(), 1);
        assert_eq!(stats.total_bases_removed, 3);
        assert!((stats.pass_rate() - 50.0).abs() < 1e-12);
    }
}
