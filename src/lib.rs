pub mod config;
pub mod driver;
pub mod error;
pub mod filter;
pub mod quality;
pub mod reader;
pub mod record;
pub mod summary;
pub mod writer;

pub use config::{FilterConfig, FilterConfigBuilder, ReadType};
pub use driver::{FilterMode, FilterRun};
pub use error::{FilterError, Result};
pub use filter::{FilterStats, StreamFilter};
pub use quality::average_quality;
pub use reader::FastqReader;
pub use record::{Crop, OwnedRecord, Record};
pub use summary::{SummaryFilter, SummaryIndex, SummaryRow, SummaryTable};
pub use writer::FastqWriter;
