use crate::error::{FilterError, Result};
use crate::record::Crop;
use std::fmt;

/// Basecalled read type selected from a sequencing summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ReadType {
    #[default]
    #[value(name = "1D")]
    OneD,
    #[value(name = "2D")]
    TwoD,
    #[value(name = "1D2")]
    OneDSquare,
}

impl ReadType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadType::OneD => "1D",
            ReadType::TwoD => "2D",
            ReadType::OneDSquare => "1D2",
        }
    }
}

impl fmt::Display for ReadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks that a GC bound is a fraction.
pub fn validate_gc(value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(FilterError::GcOutOfBounds { value })
    }
}

/// Settings of one filtering run. Fields are only set through
/// [`FilterConfigBuilder::build`], so a `FilterConfig` always has GC bounds
/// inside `[0, 1]` with `min_gc <= max_gc`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    min_length: usize,
    headcrop: Option<usize>,
    tailcrop: Option<usize>,
    min_quality: f64,
    min_gc: f64,
    max_gc: f64,
    read_type: ReadType,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            min_length: 1,
            headcrop: None,
            tailcrop: None,
            min_quality: 0.0,
            min_gc: 0.0,
            max_gc: 1.0,
            read_type: ReadType::OneD,
        }
    }
}

impl FilterConfig {
    pub fn builder() -> FilterConfigBuilder {
        FilterConfigBuilder::new()
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn headcrop(&self) -> Option<usize> {
        self.headcrop
    }

    pub fn tailcrop(&self) -> Option<usize> {
        self.tailcrop
    }

    pub fn min_quality(&self) -> f64 {
        self.min_quality
    }

    pub fn min_gc(&self) -> f64 {
        self.min_gc
    }

    pub fn max_gc(&self) -> f64 {
        self.max_gc
    }

    pub fn read_type(&self) -> ReadType {
        self.read_type
    }

    pub fn crop(&self) -> Crop {
        Crop::new(self.headcrop, self.tailcrop)
    }

    /// GC content only needs computing when a bound is narrower than [0, 1].
    pub fn gc_constrained(&self) -> bool {
        self.min_gc > 0.0 || self.max_gc < 1.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterConfigBuilder {
    config: FilterConfig,
}

impl FilterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.config.min_length = length;
        self
    }

    /// A crop of 0 is the same as no crop.
    pub fn headcrop(mut self, bases: Option<usize>) -> Self {
        self.config.headcrop = bases.filter(|&n| n > 0);
        self
    }

    /// A crop of 0 is the same as no crop.
    pub fn tailcrop(mut self, bases: Option<usize>) -> Self {
        self.config.tailcrop = bases.filter(|&n| n > 0);
        self
    }

    pub fn min_quality(mut self, quality: f64) -> Self {
        self.config.min_quality = quality;
        self
    }

    pub fn min_gc(mut self, gc: f64) -> Self {
        self.config.min_gc = gc;
        self
    }

    pub fn max_gc(mut self, gc: f64) -> Self {
        self.config.max_gc = gc;
        self
    }

    pub fn read_type(mut self, read_type: ReadType) -> Self {
        self.config.read_type = read_type;
        self
    }

    pub fn build(self) -> Result<FilterConfig> {
        let config = self.config;
        validate_gc(config.min_gc)?;
        validate_gc(config.max_gc)?;
        if config.min_gc > config.max_gc {
            return Err(FilterError::InvalidGcRange {
                min: config.min_gc,
                max: config.max_gc,
            });
        }
        Ok(config)
    }
}
