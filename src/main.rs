//! CLI entry point for wave function collapse tile generation

use clap::Parser;
use wavetile::io::cli::{Cli, FileProcessor};
use wavetile::io::logging::init_logging;

fn main() -> wavetile::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet)?;
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
