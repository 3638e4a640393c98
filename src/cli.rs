use clap::{Arg, ArgAction, Command, CommandFactory, FromArgMatches, Parser};
use nanofilt::{config::validate_gc, FilterConfig, ReadType, Result};
use std::ffi::OsString;
use std::path::PathBuf;

/// Perform quality and/or length and/or GC filtering of Nanopore fastq data.
/// Reads on stdin, writes to stdout.
#[derive(Parser, Debug)]
#[command(name = "NanoFilt", version, disable_version_flag = true, about, long_about = None)]
pub struct Args {
    /// Filter on a minimum read length
    #[arg(short = 'l', long = "length", default_value_t = 1)]
    pub length: usize,

    /// Trim n nucleotides from start of read
    #[arg(long)]
    pub headcrop: Option<usize>,

    /// Trim n nucleotides from end of read
    #[arg(long)]
    pub tailcrop: Option<usize>,

    /// Filter on a minimum average read quality score
    #[arg(short = 'q', long = "quality", default_value_t = 0.0)]
    pub quality: f64,

    /// Sequences must have GC content >= to this. Float between 0.0 and 1.0.
    /// Ignored if using summary file.
    #[arg(long = "minGC", default_value_t = 0.0, value_parser = parse_gc)]
    pub min_gc: f64,

    /// Sequences must have GC content <= to this. Float between 0.0 and 1.0.
    /// Ignored if using summary file.
    #[arg(long = "maxGC", default_value_t = 1.0, value_parser = parse_gc)]
    pub max_gc: f64,

    /// Use summary file for quality scores
    #[arg(short = 's', long = "summary")]
    pub summary: Option<PathBuf>,

    /// Which read type to extract information about from summary
    #[arg(long = "readtype", value_enum, default_value_t = ReadType::OneD)]
    pub read_type: ReadType,

    /// Log level for messages on stderr, overridden by RUST_LOG
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Command with `-v/--version` in place of clap's `-V`.
    pub fn command_line() -> Command {
        Self::command().arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .action(ArgAction::Version)
                .help("Print version"),
        )
    }

    pub fn try_parse_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command_line().try_get_matches_from(args)?;
        Self::from_arg_matches(&matches)
    }

    /// Parses the process arguments, exiting with a usage message on error.
    pub fn parse_args() -> Self {
        Self::try_parse_args(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    pub fn to_config(&self) -> Result<FilterConfig> {
        FilterConfig::builder()
            .min_length(self.length)
            .headcrop(self.headcrop)
            .tailcrop(self.tailcrop)
            .min_quality(self.quality)
            .min_gc(self.min_gc)
            .max_gc(self.max_gc)
            .read_type(self.read_type)
            .build()
    }
}

fn parse_gc(value: &str) -> std::result::Result<f64, String> {
    let gc: f64 = value.parse().map_err(|e| format!("{}", e))?;
    validate_gc(gc).map_err(|e| e.to_string())
}
