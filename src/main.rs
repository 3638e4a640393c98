mod cli;

use nanofilt::{FilterMode, FilterRun, Result, SummaryIndex, SummaryTable};
use std::io;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::Args::parse_args();
    init_logging(&args.log_level);

    if let Err(e) = run(&args) {
        if e.is_broken_pipe() {
            debug!("output closed by downstream consumer");
            return;
        }
        eprintln!("NanoFilt: error: {}", e);
        process::exit(1);
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &cli::Args) -> Result<()> {
    let config = args.to_config()?;

    let mode = match &args.summary {
        Some(path) => {
            let table = SummaryTable::from_path(path, config.read_type())?;
            FilterMode::Summary(SummaryIndex::build(table.into_rows(), config.read_type()))
        }
        None => FilterMode::Stream,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    FilterRun::new(config, mode).run(stdin.lock(), stdout.lock())?;
    Ok(())
}
